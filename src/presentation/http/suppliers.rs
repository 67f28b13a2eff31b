use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::use_cases::suppliers::create_supplier::CreateSupplier;
use crate::application::use_cases::suppliers::delete_supplier::DeleteSupplier;
use crate::application::use_cases::suppliers::list_suppliers::ListSuppliers;
use crate::bootstrap::app_context::AppContext;
use crate::domain::catalog::supplier as domain;
use crate::presentation::http::error::{ApiError, require_text};
use crate::presentation::http::responses::{CreatedResponse, DeleteResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct Supplier {
    #[serde(rename = "idProveedor")]
    pub id: i64,
    #[serde(rename = "proveedor")]
    pub name: String,
}

impl From<domain::Supplier> for Supplier {
    fn from(s: domain::Supplier) -> Self {
        Supplier {
            id: s.id,
            name: s.name,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSupplierRequest {
    pub proveedor: Option<String>,
}

#[utoipa::path(get, path = "/proveedores", tag = "Suppliers",
    responses((status = 200, body = [Supplier])))]
pub async fn list_suppliers(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<Supplier>>, ApiError> {
    let repo = ctx.supplier_repo();
    let uc = ListSuppliers {
        repo: repo.as_ref(),
    };
    let items = uc.execute().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/proveedores", tag = "Suppliers", request_body = CreateSupplierRequest,
    responses((status = 200, body = CreatedResponse), (status = 400, body = ErrorBody)))]
pub async fn create_supplier(
    State(ctx): State<AppContext>,
    body: Result<Json<CreateSupplierRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(req) = body?;
    let name = require_text(req.proveedor, "proveedor")?;
    let repo = ctx.supplier_repo();
    let uc = CreateSupplier {
        repo: repo.as_ref(),
    };
    let id = uc.execute(&name).await?;
    Ok(Json(CreatedResponse { id }))
}

#[utoipa::path(delete, path = "/proveedores/{id}", tag = "Suppliers",
    params(("id" = i64, Path, description = "Supplier id")),
    responses((status = 200, body = DeleteResponse), (status = 400, body = ErrorBody)))]
pub async fn delete_supplier(
    State(ctx): State<AppContext>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path(id) = path?;
    let repo = ctx.supplier_repo();
    let uc = DeleteSupplier {
        repo: repo.as_ref(),
    };
    let deleted = uc.execute(id).await?;
    Ok(Json(DeleteResponse::from_deleted(deleted)))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/proveedores", get(list_suppliers).post(create_supplier))
        .route("/proveedores/:id", delete(delete_supplier))
        .with_state(ctx)
}
