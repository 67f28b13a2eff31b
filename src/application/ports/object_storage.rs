use async_trait::async_trait;

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Create the container if it does not exist yet. An existing container is success.
    async fn ensure_container(&self, container: &str) -> anyhow::Result<()>;
    /// Store `bytes` under `key` and return the durable URL of the object.
    async fn upload(
        &self,
        container: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> anyhow::Result<String>;
    async fn delete_object(&self, container: &str, key: &str) -> anyhow::Result<()>;
}
