pub mod create_link;
pub mod delete_link;
pub mod list_links;
