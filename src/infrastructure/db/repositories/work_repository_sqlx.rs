use async_trait::async_trait;
use sqlx::Row;
use sqlx::mysql::MySqlRow;

use crate::application::ports::work_repository::WorkRepository;
use crate::domain::catalog::work::{Work, WorkSupplier};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::repositories::text_or_empty;

pub struct SqlxWorkRepository {
    pub pool: DbPool,
}

impl SqlxWorkRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn work_from_row(r: &MySqlRow) -> Result<Work, sqlx::Error> {
    Ok(Work {
        id: r.try_get("idObra")?,
        name: text_or_empty(r, "nombre")?,
    })
}

fn work_supplier_from_row(r: &MySqlRow) -> Result<WorkSupplier, sqlx::Error> {
    Ok(WorkSupplier {
        supplier_id: r.try_get("idProveedor")?,
        supplier_name: text_or_empty(r, "proveedor")?,
        work_id: r.try_get("obra_id")?,
    })
}

#[async_trait]
impl WorkRepository for SqlxWorkRepository {
    async fn list_works(&self) -> anyhow::Result<Vec<Work>> {
        let rows = sqlx::query("SELECT idObra, nombre FROM obras")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(work_from_row).collect::<Result<_, _>>()?)
    }

    async fn insert_work(&self, name: &str) -> anyhow::Result<i64> {
        let res = sqlx::query("INSERT INTO obras (nombre) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(i64::try_from(res.last_insert_id())?)
    }

    async fn delete_work(&self, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM obras WHERE idObra = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_work_suppliers(&self, work_id: i64) -> anyhow::Result<Vec<WorkSupplier>> {
        let rows = sqlx::query(
            r#"SELECT p.idProveedor, p.proveedor, po.obra_id
               FROM proveedores p
               JOIN proveedores_obras po ON p.idProveedor = po.proveedor_id
               WHERE po.obra_id = ?"#,
        )
        .bind(work_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .iter()
            .map(work_supplier_from_row)
            .collect::<Result<_, _>>()?)
    }
}
