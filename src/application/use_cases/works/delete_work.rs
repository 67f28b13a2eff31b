use crate::application::ports::work_repository::WorkRepository;

pub struct DeleteWork<'a, R: WorkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: WorkRepository + ?Sized> DeleteWork<'a, R> {
    /// The container and its images are left in place.
    pub async fn execute(&self, id: i64) -> anyhow::Result<bool> {
        let deleted = self.repo.delete_work(id).await?;
        if !deleted {
            tracing::debug!(work_id = id, "delete_work_no_match");
        }
        Ok(deleted)
    }
}
