#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Work {
    pub id: i64,
    pub name: String,
}

/// Supplier row reached through the `proveedores_obras` join for one work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkSupplier {
    pub supplier_id: i64,
    pub supplier_name: String,
    pub work_id: i64,
}
