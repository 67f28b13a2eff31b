use crate::application::ports::supplier_repository::SupplierRepository;

pub struct DeleteSupplier<'a, R: SupplierRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: SupplierRepository + ?Sized> DeleteSupplier<'a, R> {
    pub async fn execute(&self, id: i64) -> anyhow::Result<bool> {
        self.repo.delete_supplier(id).await
    }
}
