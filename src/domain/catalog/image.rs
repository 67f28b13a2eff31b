#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub id: i64,
    pub url: String,
    pub supplier_id: Option<i64>,
    pub work_id: Option<i64>,
}

/// Blob key for an uploaded work image: `{supplier_id}_{unix_millis}.jpg`.
pub fn image_blob_key(supplier_id: i64, created_at: chrono::DateTime<chrono::Utc>) -> String {
    format!("{}_{}.jpg", supplier_id, created_at.timestamp_millis())
}

/// Object storage container that holds every image of one work.
pub fn work_container_name(prefix: &str, work_id: i64) -> String {
    format!("{}{}", prefix, work_id)
}
