pub mod create_work;
pub mod delete_work;
pub mod list_work_suppliers;
pub mod list_works;
