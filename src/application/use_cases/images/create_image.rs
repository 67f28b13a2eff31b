use crate::application::ports::image_repository::ImageRepository;

pub struct CreateImage<'a, R: ImageRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ImageRepository + ?Sized> CreateImage<'a, R> {
    /// Records an image whose URL was obtained elsewhere; nothing is uploaded.
    pub async fn execute(
        &self,
        url: &str,
        supplier_id: Option<i64>,
        work_id: Option<i64>,
    ) -> anyhow::Result<i64> {
        self.repo.insert_image(url, supplier_id, work_id).await
    }
}
