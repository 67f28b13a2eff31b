pub mod create_user;
pub mod delete_user;
pub mod list_users;
pub mod validate_user;
