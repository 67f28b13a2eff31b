use crate::application::ports::work_supplier_repository::WorkSupplierRepository;

pub struct DeleteLink<'a, R: WorkSupplierRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: WorkSupplierRepository + ?Sized> DeleteLink<'a, R> {
    pub async fn execute(&self, id: i64) -> anyhow::Result<bool> {
        self.repo.delete_link(id).await
    }
}
