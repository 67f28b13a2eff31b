use sqlx::Row;
use sqlx::mysql::MySqlRow;

pub mod image_repository_sqlx;
pub mod supplier_repository_sqlx;
pub mod user_repository_sqlx;
pub mod work_repository_sqlx;
pub mod work_supplier_repository_sqlx;

/// Text column that may be NULL in tables created before the NOT NULL constraints.
pub(crate) fn text_or_empty(row: &MySqlRow, column: &str) -> Result<String, sqlx::Error> {
    Ok(row
        .try_get::<Option<String>, _>(column)?
        .unwrap_or_default())
}
