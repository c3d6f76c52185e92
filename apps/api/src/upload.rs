//! Multipart photo uploads shared by the detection and from-image endpoints.

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;

use crate::errors::AppError;
use crate::llm_client::ImagePayload;

/// Form field carrying the photo.
pub const IMAGE_FIELD: &str = "image";

/// A parsed upload form. Unknown fields are ignored.
#[derive(Debug)]
pub struct UploadForm {
    pub image: ImagePayload,
    pub recipe_count: Option<usize>,
    pub confidence_threshold: Option<f32>,
}

impl UploadForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut image = None;
        let mut recipe_count = None;
        let mut confidence_threshold = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                IMAGE_FIELD => {
                    let mime_type = resolve_mime_type(field.content_type(), field.file_name())?;
                    let bytes = field.bytes().await.map_err(multipart_error)?;
                    if bytes.is_empty() {
                        return Err(AppError::Validation("Uploaded image is empty".to_string()));
                    }
                    image = Some(ImagePayload { mime_type, bytes });
                }
                "recipe_count" => {
                    let raw = field.text().await.map_err(multipart_error)?;
                    recipe_count = Some(parse_field(&name, &raw)?);
                }
                "confidence_threshold" => {
                    let raw = field.text().await.map_err(multipart_error)?;
                    confidence_threshold = Some(parse_field(&name, &raw)?);
                }
                _ => {}
            }
        }

        let image = image.ok_or_else(|| {
            AppError::Validation(format!("Missing '{IMAGE_FIELD}' file field"))
        })?;

        Ok(Self {
            image,
            recipe_count,
            confidence_threshold,
        })
    }
}

/// Accepts JPEG and PNG. The declared content type wins; a generic or missing
/// one falls back to the file extension.
pub fn resolve_mime_type(
    content_type: Option<&str>,
    file_name: Option<&str>,
) -> Result<String, AppError> {
    let declared = content_type
        .map(|c| c.trim().to_ascii_lowercase())
        .filter(|c| !c.is_empty() && c != "application/octet-stream");

    let mime = match declared {
        Some(declared) => match declared.as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some("image/jpeg"),
            "image/png" => Some("image/png"),
            _ => {
                return Err(AppError::UnsupportedMediaType(format!(
                    "Unsupported image type '{declared}'; upload a JPEG or PNG"
                )))
            }
        },
        None => file_name
            .and_then(|f| f.rsplit_once('.'))
            .and_then(|(_, ext)| match ext.to_ascii_lowercase().as_str() {
                "jpg" | "jpeg" => Some("image/jpeg"),
                "png" => Some("image/png"),
                _ => None,
            }),
    };

    mime.map(str::to_string).ok_or_else(|| {
        AppError::UnsupportedMediaType(
            "Could not determine image type; upload a .jpg, .jpeg or .png file".to_string(),
        )
    })
}

fn parse_field<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| AppError::Validation(format!("Field '{name}' has an invalid value: '{raw}'")))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}
