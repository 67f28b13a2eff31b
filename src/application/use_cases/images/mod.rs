pub mod create_image;
pub mod delete_image;
pub mod list_image_urls;
pub mod list_images;
pub mod upload_image;
