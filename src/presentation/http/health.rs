use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::infrastructure::db::DbPool;

#[derive(Debug, Serialize, ToSchema)]
pub struct HelloResp {
    pub message: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    pub status: &'static str,
}

#[utoipa::path(get, path = "/", tag = "Health", responses((status = 200, body = HelloResp)))]
pub async fn hello() -> Json<HelloResp> {
    Json(HelloResp {
        message: "Hello from the server!",
    })
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, body = HealthResp))
)]
pub async fn health(State(pool): State<DbPool>) -> Json<HealthResp> {
    let db_ok = sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&pool)
        .await
        .is_ok();
    let status = if db_ok { "ok" } else { "degraded" };
    Json(HealthResp { status })
}

pub fn root_routes() -> Router {
    Router::new().route("/", get(hello))
}

pub fn routes(pool: DbPool) -> Router {
    Router::new().route("/health", get(health)).with_state(pool)
}
