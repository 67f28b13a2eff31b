use axum::{
    Json, Router,
    extract::{
        Multipart, Path, State,
        multipart::MultipartRejection,
        rejection::{JsonRejection, PathRejection},
    },
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::use_cases::images::create_image::CreateImage;
use crate::application::use_cases::images::delete_image::DeleteImage;
use crate::application::use_cases::images::list_image_urls::ListImageUrls;
use crate::application::use_cases::images::list_images::ListImages;
use crate::application::use_cases::images::upload_image::UploadImage;
use crate::bootstrap::app_context::AppContext;
use crate::domain::catalog::image as domain;
use crate::presentation::http::error::{ApiError, require_text};
use crate::presentation::http::responses::{CreatedResponse, DeleteResponse};

/// Multipart field carrying the image bytes.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize, ToSchema)]
pub struct Image {
    #[serde(rename = "imagenId")]
    pub id: i64,
    pub url: String,
    #[serde(rename = "proveedorId")]
    pub supplier_id: Option<i64>,
    #[serde(rename = "obraId")]
    pub work_id: Option<i64>,
}

impl From<domain::Image> for Image {
    fn from(i: domain::Image) -> Self {
        Image {
            id: i.id,
            url: i.url,
            supplier_id: i.supplier_id,
            work_id: i.work_id,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateImageRequest {
    pub url: Option<String>,
    #[serde(rename = "proveedorId")]
    pub supplier_id: Option<i64>,
    #[serde(rename = "obraId")]
    pub work_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadImageResponse {
    pub id: i64,
    pub url: String,
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadImageMultipart {
    /// Image bytes
    #[schema(value_type = String, format = Binary)]
    image: String,
}

#[utoipa::path(get, path = "/imagenes", tag = "Images",
    responses((status = 200, body = [Image])))]
pub async fn list_images(State(ctx): State<AppContext>) -> Result<Json<Vec<Image>>, ApiError> {
    let repo = ctx.image_repo();
    let uc = ListImages {
        repo: repo.as_ref(),
    };
    let items = uc.execute().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/imagenes", tag = "Images", request_body = CreateImageRequest,
    responses((status = 200, body = CreatedResponse), (status = 400, body = ErrorBody)))]
pub async fn create_image(
    State(ctx): State<AppContext>,
    body: Result<Json<CreateImageRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(req) = body?;
    let url = require_text(req.url, "url")?;
    let repo = ctx.image_repo();
    let uc = CreateImage {
        repo: repo.as_ref(),
    };
    let id = uc.execute(&url, req.supplier_id, req.work_id).await?;
    Ok(Json(CreatedResponse { id }))
}

#[utoipa::path(delete, path = "/imagenes/{id}", tag = "Images",
    params(("id" = i64, Path, description = "Image id")),
    responses((status = 200, body = DeleteResponse), (status = 400, body = ErrorBody)))]
pub async fn delete_image(
    State(ctx): State<AppContext>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path(id) = path?;
    let repo = ctx.image_repo();
    let uc = DeleteImage {
        repo: repo.as_ref(),
    };
    let deleted = uc.execute(id).await?;
    Ok(Json(DeleteResponse::from_deleted(deleted)))
}

/// POST /uploadImage/{obraID}/{proveedorID} (multipart/form-data)
/// Fields:
/// - image: binary file (required, non-empty)
#[utoipa::path(
    post,
    path = "/uploadImage/{obraID}/{proveedorID}",
    tag = "Images",
    params(
        ("obraID" = i64, Path, description = "Work id"),
        ("proveedorID" = i64, Path, description = "Supplier id"),
    ),
    request_body(content = UploadImageMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = UploadImageResponse),
        (status = 400, body = ErrorBody),
        (status = 413, body = ErrorBody),
    )
)]
pub async fn upload_image(
    State(ctx): State<AppContext>,
    path: Result<Path<(i64, i64)>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadImageResponse>, ApiError> {
    let Path((work_id, supplier_id)) = path?;
    let mut multipart = multipart?;

    let mut file_bytes: Option<Vec<u8>> = None;
    let mut content_type: Option<String> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        content_type = field.content_type().map(|s| s.to_string());
        let data = field.bytes().await?;
        if !data.is_empty() {
            file_bytes = Some(data.to_vec());
        }
    }
    let bytes = file_bytes.ok_or_else(|| {
        ApiError::validation(format!("a non-empty '{IMAGE_FIELD}' file part is required"))
    })?;

    let repo = ctx.image_repo();
    let storage = ctx.object_storage();
    let uc = UploadImage {
        repo: repo.as_ref(),
        storage: storage.as_ref(),
        container_prefix: &ctx.cfg.storage.container_prefix,
    };
    let out = uc
        .execute(work_id, supplier_id, bytes, content_type)
        .await?;
    Ok(Json(UploadImageResponse {
        id: out.id,
        url: out.url,
    }))
}

#[utoipa::path(get, path = "/getImages/{obraID}/{proveedorID}", tag = "Images",
    params(
        ("obraID" = i64, Path, description = "Work id"),
        ("proveedorID" = i64, Path, description = "Supplier id"),
    ),
    responses((status = 200, body = [ImageUrl]), (status = 400, body = ErrorBody)))]
pub async fn get_images(
    State(ctx): State<AppContext>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<Json<Vec<ImageUrl>>, ApiError> {
    let Path((work_id, supplier_id)) = path?;
    let repo = ctx.image_repo();
    let uc = ListImageUrls {
        repo: repo.as_ref(),
    };
    let urls = uc.execute(work_id, supplier_id).await?;
    Ok(Json(urls.into_iter().map(|url| ImageUrl { url }).collect()))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/imagenes", get(list_images).post(create_image))
        .route("/imagenes/:id", delete(delete_image))
        .route("/uploadImage/:obra_id/:proveedor_id", post(upload_image))
        .route("/getImages/:obra_id/:proveedor_id", get(get_images))
        .with_state(ctx)
}
