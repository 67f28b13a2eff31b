use async_trait::async_trait;

use crate::domain::catalog::work::{Work, WorkSupplier};

#[async_trait]
pub trait WorkRepository: Send + Sync {
    async fn list_works(&self) -> anyhow::Result<Vec<Work>>;
    async fn insert_work(&self, name: &str) -> anyhow::Result<i64>;
    /// Returns whether a row was removed.
    async fn delete_work(&self, id: i64) -> anyhow::Result<bool>;
    async fn list_work_suppliers(&self, work_id: i64) -> anyhow::Result<Vec<WorkSupplier>>;
}
