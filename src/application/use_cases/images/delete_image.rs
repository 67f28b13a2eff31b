use crate::application::ports::image_repository::ImageRepository;

pub struct DeleteImage<'a, R: ImageRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ImageRepository + ?Sized> DeleteImage<'a, R> {
    pub async fn execute(&self, id: i64) -> anyhow::Result<bool> {
        self.repo.delete_image(id).await
    }
}
