use crate::application::ports::image_repository::ImageRepository;
use crate::application::ports::object_storage::ObjectStorage;
use crate::domain::catalog::image::{image_blob_key, work_container_name};

pub struct UploadImage<'a, R, S>
where
    R: ImageRepository + ?Sized,
    S: ObjectStorage + ?Sized,
{
    pub repo: &'a R,
    pub storage: &'a S,
    pub container_prefix: &'a str,
}

#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub id: i64,
    pub url: String,
    pub container: String,
    pub key: String,
}

impl<'a, R, S> UploadImage<'a, R, S>
where
    R: ImageRepository + ?Sized,
    S: ObjectStorage + ?Sized,
{
    pub async fn execute(
        &self,
        work_id: i64,
        supplier_id: i64,
        bytes: Vec<u8>,
        content_type: Option<String>,
    ) -> anyhow::Result<UploadedImage> {
        let container = work_container_name(self.container_prefix, work_id);
        self.storage
            .ensure_container(&container)
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, %container, "ensure_container_failed");
                err
            })?;

        let key = image_blob_key(supplier_id, chrono::Utc::now());
        let content_type = content_type.or_else(|| {
            mime_guess::from_path(&key)
                .first()
                .map(|m| m.essence_str().to_string())
        });
        let size = bytes.len();
        let url = self
            .storage
            .upload(&container, &key, bytes, content_type.as_deref())
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, %container, %key, "upload_image_failed");
                err
            })?;

        let id = match self
            .repo
            .insert_image(&url, Some(supplier_id), Some(work_id))
            .await
        {
            Ok(id) => id,
            Err(err) => {
                tracing::error!(error = ?err, work_id, supplier_id, "insert_image_failed");
                // Drop the blob so storage does not keep an image no row points at.
                if let Err(cleanup) = self.storage.delete_object(&container, &key).await {
                    tracing::warn!(error = ?cleanup, %container, %key, "orphan_blob_cleanup_failed");
                }
                return Err(err);
            }
        };

        tracing::info!(image_id = id, work_id, supplier_id, size, %key, "image_uploaded");
        Ok(UploadedImage {
            id,
            url,
            container,
            key,
        })
    }
}
