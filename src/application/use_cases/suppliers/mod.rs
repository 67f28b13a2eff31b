pub mod create_supplier;
pub mod delete_supplier;
pub mod list_suppliers;
