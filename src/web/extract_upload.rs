// Multipart extraction and validation for wardrobe uploads.

use axum::extract::Multipart;
use axum::extract::multipart::Field;
use tracing::{debug, warn};

use super::MAX_IMAGE_SIZE_BYTES;
use super::error::ApiError;

/// Declared MIME types accepted for wardrobe uploads. Bytes are stored as
/// declared; no content sniffing happens.
pub const ALLOWED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// A validated wardrobe upload, ready to be persisted.
pub struct UploadRequest {
    pub owner_id: String,
    pub category: String,
    pub image_bytes: Vec<u8>,
    pub mime_type: String,
    pub file_name: Option<String>,
}

/// Walks the multipart fields and validates the upload. Nothing is written
/// to the store until every check here has passed.
pub async fn extract_upload(mut multipart: Multipart) -> Result<UploadRequest, ApiError> {
    let mut owner_id: Option<String> = None;
    let mut category: Option<String> = None;
    let mut image: Option<(Vec<u8>, String, Option<String>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to process multipart field: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                if image.is_some() {
                    warn!("Multiple 'image' fields found in upload, using the last one");
                }

                let mime_type = field.content_type().map(str::to_string).ok_or_else(|| {
                    ApiError::BadRequest("Uploaded 'image' field has no content type".to_string())
                })?;
                let file_name = field.file_name().map(str::to_string);

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read image data: {}", e)))?
                    .to_vec();

                image = Some((data, mime_type, file_name));
            }
            Some("userId") => {
                owner_id = Some(read_text_field(field).await?);
            }
            Some("category") => {
                category = Some(read_text_field(field).await?);
            }
            other => {
                debug!("Ignoring multipart field: {}", other.unwrap_or("unnamed"));
            }
        }
    }

    let (image_bytes, mime_type, file_name) =
        image.ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;

    if image_bytes.is_empty() {
        return Err(ApiError::BadRequest(
            "Uploaded 'image' field is empty".to_string(),
        ));
    }

    if image_bytes.len() > MAX_IMAGE_SIZE_BYTES {
        return Err(ApiError::BadRequest("File too large".to_string()));
    }

    if !ALLOWED_IMAGE_TYPES.contains(&mime_type.as_str()) {
        return Err(ApiError::BadRequest(
            "Only image files are allowed!".to_string(),
        ));
    }

    let owner_id = require_value(owner_id, "userId")?;
    let category = require_value(category, "category")?;

    Ok(UploadRequest {
        owner_id,
        category,
        image_bytes,
        mime_type,
        file_name,
    })
}

async fn read_text_field(field: Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read form field: {}", e)))
}

fn require_value(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::BadRequest(format!("Missing '{}' field", name))),
    }
}
