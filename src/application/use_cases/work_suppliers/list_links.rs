use crate::application::ports::work_supplier_repository::WorkSupplierRepository;
use crate::domain::catalog::supplier::WorkSupplierLink;

pub struct ListLinks<'a, R: WorkSupplierRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: WorkSupplierRepository + ?Sized> ListLinks<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<WorkSupplierLink>> {
        self.repo.list_links().await
    }
}
