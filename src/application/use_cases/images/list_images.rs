use crate::application::ports::image_repository::ImageRepository;
use crate::domain::catalog::image::Image;

pub struct ListImages<'a, R: ImageRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ImageRepository + ?Sized> ListImages<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<Image>> {
        self.repo.list_images().await
    }
}
