use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::use_cases::works::create_work::CreateWork;
use crate::application::use_cases::works::delete_work::DeleteWork;
use crate::application::use_cases::works::list_work_suppliers::ListWorkSuppliers;
use crate::application::use_cases::works::list_works::ListWorks;
use crate::bootstrap::app_context::AppContext;
use crate::domain::catalog::work as domain;
use crate::presentation::http::error::{ApiError, require_text};
use crate::presentation::http::responses::{CreatedResponse, DeleteResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct Work {
    #[serde(rename = "idObra")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
}

impl From<domain::Work> for Work {
    fn from(w: domain::Work) -> Self {
        Work {
            id: w.id,
            name: w.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkSupplier {
    #[serde(rename = "idProveedor")]
    pub supplier_id: i64,
    #[serde(rename = "proveedor")]
    pub supplier_name: String,
    #[serde(rename = "obraId")]
    pub work_id: i64,
}

impl From<domain::WorkSupplier> for WorkSupplier {
    fn from(s: domain::WorkSupplier) -> Self {
        WorkSupplier {
            supplier_id: s.supplier_id,
            supplier_name: s.supplier_name,
            work_id: s.work_id,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWorkRequest {
    pub nombre: Option<String>,
}

#[utoipa::path(get, path = "/obras", tag = "Works",
    responses((status = 200, body = [Work])))]
pub async fn list_works(State(ctx): State<AppContext>) -> Result<Json<Vec<Work>>, ApiError> {
    let repo = ctx.work_repo();
    let uc = ListWorks {
        repo: repo.as_ref(),
    };
    let items = uc.execute().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/obras", tag = "Works", request_body = CreateWorkRequest,
    responses((status = 200, body = CreatedResponse), (status = 400, body = ErrorBody)))]
pub async fn create_work(
    State(ctx): State<AppContext>,
    body: Result<Json<CreateWorkRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(req) = body?;
    let name = require_text(req.nombre, "nombre")?;
    let repo = ctx.work_repo();
    let storage = ctx.object_storage();
    let uc = CreateWork {
        repo: repo.as_ref(),
        storage: storage.as_ref(),
        container_prefix: &ctx.cfg.storage.container_prefix,
    };
    let id = uc.execute(&name).await?;
    Ok(Json(CreatedResponse { id }))
}

#[utoipa::path(delete, path = "/obras/{id}", tag = "Works",
    params(("id" = i64, Path, description = "Work id")),
    responses((status = 200, body = DeleteResponse), (status = 400, body = ErrorBody)))]
pub async fn delete_work(
    State(ctx): State<AppContext>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path(id) = path?;
    let repo = ctx.work_repo();
    let uc = DeleteWork {
        repo: repo.as_ref(),
    };
    let deleted = uc.execute(id).await?;
    Ok(Json(DeleteResponse::from_deleted(deleted)))
}

#[utoipa::path(get, path = "/obras/{idObra}/proveedores", tag = "Works",
    params(("idObra" = i64, Path, description = "Work id")),
    responses((status = 200, body = [WorkSupplier])))]
pub async fn list_work_suppliers(
    State(ctx): State<AppContext>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<WorkSupplier>>, ApiError> {
    let Path(work_id) = path?;
    let repo = ctx.work_repo();
    let uc = ListWorkSuppliers {
        repo: repo.as_ref(),
    };
    let items = uc.execute(work_id).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/obras", get(list_works).post(create_work))
        .route("/obras/:id", delete(delete_work))
        .route("/obras/:id/proveedores", get(list_work_suppliers))
        .with_state(ctx)
}
