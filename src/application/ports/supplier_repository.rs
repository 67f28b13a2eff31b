use async_trait::async_trait;

use crate::domain::catalog::supplier::Supplier;

#[async_trait]
pub trait SupplierRepository: Send + Sync {
    async fn list_suppliers(&self) -> anyhow::Result<Vec<Supplier>>;
    async fn insert_supplier(&self, name: &str) -> anyhow::Result<i64>;
    async fn delete_supplier(&self, id: i64) -> anyhow::Result<bool>;
}
