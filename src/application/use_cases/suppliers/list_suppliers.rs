use crate::application::ports::supplier_repository::SupplierRepository;
use crate::domain::catalog::supplier::Supplier;

pub struct ListSuppliers<'a, R: SupplierRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: SupplierRepository + ?Sized> ListSuppliers<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<Supplier>> {
        self.repo.list_suppliers().await
    }
}
