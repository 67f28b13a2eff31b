#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkSupplierLink {
    pub id: i64,
    pub supplier_id: i64,
    pub work_id: i64,
}
