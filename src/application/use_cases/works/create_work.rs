use crate::application::ports::object_storage::ObjectStorage;
use crate::application::ports::work_repository::WorkRepository;
use crate::domain::catalog::image::work_container_name;

pub struct CreateWork<'a, R, S>
where
    R: WorkRepository + ?Sized,
    S: ObjectStorage + ?Sized,
{
    pub repo: &'a R,
    pub storage: &'a S,
    pub container_prefix: &'a str,
}

impl<'a, R, S> CreateWork<'a, R, S>
where
    R: WorkRepository + ?Sized,
    S: ObjectStorage + ?Sized,
{
    /// Inserts the work and provisions its image container.
    ///
    /// A container failure does not fail the request: uploads ensure the
    /// container again before writing.
    pub async fn execute(&self, name: &str) -> anyhow::Result<i64> {
        let id = self.repo.insert_work(name).await?;
        let container = work_container_name(self.container_prefix, id);
        if let Err(err) = self.storage.ensure_container(&container).await {
            tracing::warn!(error = ?err, work_id = id, %container, "ensure_work_container_failed");
        }
        Ok(id)
    }
}
