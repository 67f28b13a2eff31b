use async_trait::async_trait;

use crate::domain::catalog::image::Image;

#[async_trait]
pub trait ImageRepository: Send + Sync {
    async fn list_images(&self) -> anyhow::Result<Vec<Image>>;
    async fn insert_image(
        &self,
        url: &str,
        supplier_id: Option<i64>,
        work_id: Option<i64>,
    ) -> anyhow::Result<i64>;
    async fn delete_image(&self, id: i64) -> anyhow::Result<bool>;
    async fn list_image_urls(&self, work_id: i64, supplier_id: i64) -> anyhow::Result<Vec<String>>;
}
