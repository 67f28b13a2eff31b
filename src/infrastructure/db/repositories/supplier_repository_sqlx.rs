use async_trait::async_trait;
use sqlx::Row;
use sqlx::mysql::MySqlRow;

use crate::application::ports::supplier_repository::SupplierRepository;
use crate::domain::catalog::supplier::Supplier;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::repositories::text_or_empty;

pub struct SqlxSupplierRepository {
    pub pool: DbPool,
}

impl SqlxSupplierRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn supplier_from_row(r: &MySqlRow) -> Result<Supplier, sqlx::Error> {
    Ok(Supplier {
        id: r.try_get("idProveedor")?,
        name: text_or_empty(r, "proveedor")?,
    })
}

#[async_trait]
impl SupplierRepository for SqlxSupplierRepository {
    async fn list_suppliers(&self) -> anyhow::Result<Vec<Supplier>> {
        let rows = sqlx::query("SELECT idProveedor, proveedor FROM proveedores")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(supplier_from_row).collect::<Result<_, _>>()?)
    }

    async fn insert_supplier(&self, name: &str) -> anyhow::Result<i64> {
        let res = sqlx::query("INSERT INTO proveedores (proveedor) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(i64::try_from(res.last_insert_id())?)
    }

    async fn delete_supplier(&self, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM proveedores WHERE idProveedor = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
