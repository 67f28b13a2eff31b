use crate::application::ports::work_supplier_repository::WorkSupplierRepository;

pub struct CreateLink<'a, R: WorkSupplierRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: WorkSupplierRepository + ?Sized> CreateLink<'a, R> {
    // Duplicate associations are not rejected here; the table decides.
    pub async fn execute(&self, supplier_id: i64, work_id: i64) -> anyhow::Result<i64> {
        self.repo.insert_link(supplier_id, work_id).await
    }
}
