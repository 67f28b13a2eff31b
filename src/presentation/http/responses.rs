use serde::Serialize;
use utoipa::ToSchema;

/// Body returned by every insert endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub id: i64,
}

/// `success` is true whenever the statement ran, matched or not.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    pub deleted: bool,
}

impl DeleteResponse {
    pub fn from_deleted(deleted: bool) -> Self {
        Self {
            success: true,
            deleted,
        }
    }
}
