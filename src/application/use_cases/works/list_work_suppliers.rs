use crate::application::ports::work_repository::WorkRepository;
use crate::domain::catalog::work::WorkSupplier;

pub struct ListWorkSuppliers<'a, R: WorkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: WorkRepository + ?Sized> ListWorkSuppliers<'a, R> {
    pub async fn execute(&self, work_id: i64) -> anyhow::Result<Vec<WorkSupplier>> {
        self.repo.list_work_suppliers(work_id).await
    }
}
