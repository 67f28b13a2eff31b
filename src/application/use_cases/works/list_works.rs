use crate::application::ports::work_repository::WorkRepository;
use crate::domain::catalog::work::Work;

pub struct ListWorks<'a, R: WorkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: WorkRepository + ?Sized> ListWorks<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<Work>> {
        self.repo.list_works().await
    }
}
