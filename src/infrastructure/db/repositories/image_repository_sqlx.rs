use async_trait::async_trait;
use sqlx::Row;
use sqlx::mysql::MySqlRow;

use crate::application::ports::image_repository::ImageRepository;
use crate::domain::catalog::image::Image;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::repositories::text_or_empty;

pub struct SqlxImageRepository {
    pub pool: DbPool,
}

impl SqlxImageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn image_from_row(r: &MySqlRow) -> Result<Image, sqlx::Error> {
    Ok(Image {
        id: r.try_get("imagenId")?,
        url: text_or_empty(r, "url")?,
        supplier_id: r.try_get("proveedorId")?,
        work_id: r.try_get("obraId")?,
    })
}

#[async_trait]
impl ImageRepository for SqlxImageRepository {
    async fn list_images(&self) -> anyhow::Result<Vec<Image>> {
        let rows = sqlx::query("SELECT imagenId, url, proveedorId, obraId FROM imagenes")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(image_from_row).collect::<Result<_, _>>()?)
    }

    async fn insert_image(
        &self,
        url: &str,
        supplier_id: Option<i64>,
        work_id: Option<i64>,
    ) -> anyhow::Result<i64> {
        let res = sqlx::query("INSERT INTO imagenes (url, proveedorId, obraId) VALUES (?, ?, ?)")
            .bind(url)
            .bind(supplier_id)
            .bind(work_id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            anyhow::bail!("image insert affected no rows");
        }
        Ok(i64::try_from(res.last_insert_id())?)
    }

    async fn delete_image(&self, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM imagenes WHERE imagenId = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_image_urls(&self, work_id: i64, supplier_id: i64) -> anyhow::Result<Vec<String>> {
        let rows = sqlx::query(
            "SELECT url FROM imagenes WHERE obraId = ? AND proveedorId = ? AND url IS NOT NULL",
        )
        .bind(work_id)
        .bind(supplier_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .iter()
            .map(|r| r.try_get::<String, _>("url"))
            .collect::<Result<_, _>>()?)
    }
}
