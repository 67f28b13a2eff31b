use crate::application::ports::image_repository::ImageRepository;

pub struct ListImageUrls<'a, R: ImageRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ImageRepository + ?Sized> ListImageUrls<'a, R> {
    pub async fn execute(&self, work_id: i64, supplier_id: i64) -> anyhow::Result<Vec<String>> {
        self.repo.list_image_urls(work_id, supplier_id).await
    }
}
