use async_trait::async_trait;
use sqlx::Row;
use sqlx::mysql::MySqlRow;

use crate::application::ports::work_supplier_repository::WorkSupplierRepository;
use crate::domain::catalog::supplier::WorkSupplierLink;
use crate::infrastructure::db::DbPool;

pub struct SqlxWorkSupplierRepository {
    pub pool: DbPool,
}

impl SqlxWorkSupplierRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn link_from_row(r: &MySqlRow) -> Result<WorkSupplierLink, sqlx::Error> {
    Ok(WorkSupplierLink {
        id: r.try_get("proveedor_obra_id")?,
        supplier_id: r.try_get("proveedor_id")?,
        work_id: r.try_get("obra_id")?,
    })
}

#[async_trait]
impl WorkSupplierRepository for SqlxWorkSupplierRepository {
    async fn list_links(&self) -> anyhow::Result<Vec<WorkSupplierLink>> {
        let rows =
            sqlx::query("SELECT proveedor_obra_id, proveedor_id, obra_id FROM proveedores_obras")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.iter().map(link_from_row).collect::<Result<_, _>>()?)
    }

    async fn insert_link(&self, supplier_id: i64, work_id: i64) -> anyhow::Result<i64> {
        let res = sqlx::query("INSERT INTO proveedores_obras (proveedor_id, obra_id) VALUES (?, ?)")
            .bind(supplier_id)
            .bind(work_id)
            .execute(&self.pool)
            .await?;
        Ok(i64::try_from(res.last_insert_id())?)
    }

    async fn delete_link(&self, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM proveedores_obras WHERE proveedor_obra_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
