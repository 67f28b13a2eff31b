//! Error kinds returned by handlers and their HTTP mapping.
//!
//! Downstream error text is logged, never sent to the client.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::ports::GatewayUnavailable;
use crate::application::ports::user_repository::DuplicateLogin;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or missing client input (400).
    #[error("{0}")]
    Validation(String),

    /// Upload larger than the configured body limit (413).
    #[error("payload too large")]
    PayloadTooLarge,

    /// Request clashes with an existing row (409).
    #[error("{0}")]
    Conflict(String),

    /// No route or resource (404).
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    /// Database pool, object storage or mail relay could not be reached (503).
    #[error("downstream service unavailable")]
    Unavailable(anyhow::Error),

    /// Anything else (500).
    #[error("internal error")]
    Internal(anyhow::Error),
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::PayloadTooLarge => "payload_too_large",
            Self::Conflict(_) => "conflict",
            Self::NotFound { .. } => "not_found",
            Self::Unavailable(_) => "unavailable",
            Self::Internal(_) => "internal_error",
        }
    }
}

fn is_unavailable(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        if cause.downcast_ref::<GatewayUnavailable>().is_some() {
            return true;
        }
        matches!(
            cause.downcast_ref::<sqlx::Error>(),
            Some(
                sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
            )
        )
    })
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(dup) = err.downcast_ref::<DuplicateLogin>() {
            return Self::Conflict(dup.to_string());
        }
        if is_unavailable(&err) {
            Self::Unavailable(err)
        } else {
            Self::Internal(err)
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection, "path_rejected");
        Self::validation("invalid path parameter: ids must be integers")
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "json_rejected");
        Self::validation("request body must be a valid JSON object")
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection, "query_rejected");
        Self::validation("invalid query string")
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        tracing::debug!(error = %rejection, "multipart_rejected");
        Self::validation("request must be multipart/form-data")
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            tracing::debug!(error = %err, "multipart_field_rejected");
            Self::validation("malformed multipart body")
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Unavailable(err) => tracing::error!(error = ?err, "downstream_unavailable"),
            Self::Internal(err) => tracing::error!(error = ?err, "internal_error"),
            _ => {}
        }
        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Router fallback for unknown paths.
pub async fn not_found() -> ApiError {
    ApiError::NotFound { resource: "route" }
}

/// Rejects blank strings and returns the trimmed value.
pub fn require_text(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::validation(format!("field '{field}' is required"))),
    }
}
