use crate::application::ports::supplier_repository::SupplierRepository;

pub struct CreateSupplier<'a, R: SupplierRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: SupplierRepository + ?Sized> CreateSupplier<'a, R> {
    pub async fn execute(&self, name: &str) -> anyhow::Result<i64> {
        self.repo.insert_supplier(name).await
    }
}
