pub mod images;
pub mod notifications;
pub mod suppliers;
pub mod users;
pub mod work_suppliers;
pub mod works;
