use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::use_cases::users::create_user::{
    CreateUser, CreateUserRequest as CreateUserDto,
};
use crate::application::use_cases::users::delete_user::DeleteUser;
use crate::application::use_cases::users::list_users::ListUsers;
use crate::application::use_cases::users::validate_user::{ValidateUser, ValidateUserRequest};
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user as domain;
use crate::presentation::http::error::{ApiError, require_text};
use crate::presentation::http::responses::{CreatedResponse, DeleteResponse};

/// User row as exposed to clients; the password column is never serialized.
#[derive(Debug, Serialize, ToSchema)]
pub struct User {
    #[serde(rename = "idUsuario")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "usuario")]
    pub login: String,
    #[serde(rename = "mail")]
    pub email: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

impl From<domain::User> for User {
    fn from(u: domain::User) -> Self {
        User {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            login: u.login,
            email: u.email,
            is_admin: u.is_admin,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub usuario: Option<String>,
    pub contrasena: Option<String>,
    pub mail: Option<String>,
    pub admin: Option<bool>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ValidateQuery {
    pub usuario: Option<String>,
    pub contrasena: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario: Option<User>,
}

#[utoipa::path(get, path = "/usuarios", tag = "Users",
    responses((status = 200, body = [User])))]
pub async fn list_users(State(ctx): State<AppContext>) -> Result<Json<Vec<User>>, ApiError> {
    let repo = ctx.user_repo();
    let uc = ListUsers {
        repo: repo.as_ref(),
    };
    let items = uc.execute().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/usuarios", tag = "Users", request_body = CreateUserRequest,
    responses((status = 200, body = CreatedResponse), (status = 400, body = ErrorBody), (status = 409, body = ErrorBody)))]
pub async fn create_user(
    State(ctx): State<AppContext>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(req) = body?;
    // Passwords are hashed as given; only blank ones are refused.
    let password = req
        .contrasena
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::validation("field 'contrasena' is required"))?;
    let dto = CreateUserDto {
        first_name: require_text(req.nombre, "nombre")?,
        last_name: require_text(req.apellido, "apellido")?,
        login: require_text(req.usuario, "usuario")?,
        password,
        email: require_text(req.mail, "mail")?,
        is_admin: req.admin.unwrap_or(false),
    };
    let repo = ctx.user_repo();
    let uc = CreateUser {
        repo: repo.as_ref(),
    };
    let id = uc.execute(&dto).await?;
    Ok(Json(CreatedResponse { id }))
}

#[utoipa::path(get, path = "/usuarios/validar", tag = "Users", params(ValidateQuery),
    responses((status = 200, body = ValidateResponse), (status = 400, body = ErrorBody)))]
pub async fn validate_user(
    State(ctx): State<AppContext>,
    query: Result<Query<ValidateQuery>, QueryRejection>,
) -> Result<Json<ValidateResponse>, ApiError> {
    let Query(q) = query?;
    let login = require_text(q.usuario, "usuario")?;
    let password = q
        .contrasena
        .ok_or_else(|| ApiError::validation("field 'contrasena' is required"))?;
    let repo = ctx.user_repo();
    let uc = ValidateUser {
        repo: repo.as_ref(),
    };
    let dto = ValidateUserRequest { login, password };
    let found = uc.execute(&dto).await?;
    Ok(Json(ValidateResponse {
        valid: found.is_some(),
        usuario: found.map(Into::into),
    }))
}

#[utoipa::path(delete, path = "/usuarios/{id}", tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses((status = 200, body = DeleteResponse), (status = 400, body = ErrorBody)))]
pub async fn delete_user(
    State(ctx): State<AppContext>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path(id) = path?;
    let repo = ctx.user_repo();
    let uc = DeleteUser {
        repo: repo.as_ref(),
    };
    let deleted = uc.execute(id).await?;
    Ok(Json(DeleteResponse::from_deleted(deleted)))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/usuarios", get(list_users).post(create_user))
        .route("/usuarios/validar", get(validate_user))
        .route("/usuarios/:id", delete(delete_user))
        .with_state(ctx)
}
