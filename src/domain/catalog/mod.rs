pub mod image;
pub mod supplier;
pub mod work;
