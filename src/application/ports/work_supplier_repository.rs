use async_trait::async_trait;

use crate::domain::catalog::supplier::WorkSupplierLink;

#[async_trait]
pub trait WorkSupplierRepository: Send + Sync {
    async fn list_links(&self) -> anyhow::Result<Vec<WorkSupplierLink>>;
    async fn insert_link(&self, supplier_id: i64, work_id: i64) -> anyhow::Result<i64>;
    async fn delete_link(&self, id: i64) -> anyhow::Result<bool>;
}
