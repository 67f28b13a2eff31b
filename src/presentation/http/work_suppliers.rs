use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::use_cases::work_suppliers::create_link::CreateLink;
use crate::application::use_cases::work_suppliers::delete_link::DeleteLink;
use crate::application::use_cases::work_suppliers::list_links::ListLinks;
use crate::bootstrap::app_context::AppContext;
use crate::domain::catalog::supplier::WorkSupplierLink;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::responses::{CreatedResponse, DeleteResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct Link {
    pub proveedor_obra_id: i64,
    pub proveedor_id: i64,
    pub obra_id: i64,
}

impl From<WorkSupplierLink> for Link {
    fn from(l: WorkSupplierLink) -> Self {
        Link {
            proveedor_obra_id: l.id,
            proveedor_id: l.supplier_id,
            obra_id: l.work_id,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLinkRequest {
    pub proveedor_id: Option<i64>,
    pub obra_id: Option<i64>,
}

#[utoipa::path(get, path = "/proveedores_obras", tag = "Work suppliers",
    responses((status = 200, body = [Link])))]
pub async fn list_links(State(ctx): State<AppContext>) -> Result<Json<Vec<Link>>, ApiError> {
    let repo = ctx.work_supplier_repo();
    let uc = ListLinks {
        repo: repo.as_ref(),
    };
    let items = uc.execute().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/proveedores_obras", tag = "Work suppliers", request_body = CreateLinkRequest,
    responses((status = 200, body = CreatedResponse), (status = 400, body = ErrorBody)))]
pub async fn create_link(
    State(ctx): State<AppContext>,
    body: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(req) = body?;
    let (Some(supplier_id), Some(work_id)) = (req.proveedor_id, req.obra_id) else {
        return Err(ApiError::validation(
            "fields 'proveedor_id' and 'obra_id' are required",
        ));
    };
    let repo = ctx.work_supplier_repo();
    let uc = CreateLink {
        repo: repo.as_ref(),
    };
    let id = uc.execute(supplier_id, work_id).await?;
    Ok(Json(CreatedResponse { id }))
}

#[utoipa::path(delete, path = "/proveedores_obras/{id}", tag = "Work suppliers",
    params(("id" = i64, Path, description = "Link id")),
    responses((status = 200, body = DeleteResponse), (status = 400, body = ErrorBody)))]
pub async fn delete_link(
    State(ctx): State<AppContext>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path(id) = path?;
    let repo = ctx.work_supplier_repo();
    let uc = DeleteLink {
        repo: repo.as_ref(),
    };
    let deleted = uc.execute(id).await?;
    Ok(Json(DeleteResponse::from_deleted(deleted)))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/proveedores_obras", get(list_links).post(create_link))
        .route("/proveedores_obras/:id", delete(delete_link))
        .with_state(ctx)
}
