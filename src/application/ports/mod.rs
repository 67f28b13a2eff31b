pub mod image_repository;
pub mod mailer;
pub mod object_storage;
pub mod supplier_repository;
pub mod user_repository;
pub mod work_repository;
pub mod work_supplier_repository;

#[cfg(test)]
pub mod testing;

/// Raised by an adapter whose backing service is not configured or not reachable.
#[derive(thiserror::Error, Debug)]
#[error("{gateway} unavailable: {reason}")]
pub struct GatewayUnavailable {
    pub gateway: &'static str,
    pub reason: String,
}
