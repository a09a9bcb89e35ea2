//! Request handlers.
//!
//! `process_image` implements the upload-to-HTML flow: multipart intake,
//! optional binarization, provider recognition, and page rendering.
//! `health` reports liveness and the active backend.

use axum::extract::{Multipart, State};
use axum::response::Html;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::api::state::AppState;
use crate::error::{Result, SnaptextError};
use crate::ocr;
use crate::render;

struct ImageUpload {
    bytes: Vec<u8>,
    file_name: String,
}

/// `POST /process-image`
///
/// Accepts a multipart form with a file part named `image`, runs optional
/// binarization, sends the bytes to the configured OCR backend, and renders
/// the recognized text as an HTML page. Invalid uploads yield 400; credential,
/// transport, provider, and preprocessing failures yield 500 with a plain-text
/// diagnostic.
pub async fn process_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>> {
    let upload = read_image_field(multipart).await?;
    info!(
        file_name = %upload.file_name,
        bytes = upload.bytes.len(),
        "processing uploaded image"
    );

    let (bytes, file_name) = if state.config.preprocess.enabled {
        let processed = ocr::binarize(&upload.bytes, &state.config.preprocess)?;
        // Binarization re-encodes as PNG regardless of the input format.
        (processed, "processed.png".to_string())
    } else {
        (upload.bytes, upload.file_name)
    };

    let text = state.ocr.recognize(&bytes, &file_name).await?;
    info!(
        chars = text.len(),
        provider = state.ocr.backend_name(),
        "recognition complete"
    );

    Ok(Html(render::render_page(&text)))
}

async fn read_image_field(mut multipart: Multipart) -> Result<ImageUpload> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| SnaptextError::Upload(format!("malformed multipart request: {e}")))?
    {
        if field.name() != Some("image") {
            continue;
        }
        // A bare text part named "image" is not a file upload.
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| SnaptextError::Upload(format!("failed to read upload: {e}")))?
            .to_vec();
        upload = Some(ImageUpload { bytes, file_name });
        break;
    }

    let Some(upload) = upload else {
        return Err(SnaptextError::Upload("no image file in request".to_string()));
    };
    if upload.file_name.is_empty() {
        return Err(SnaptextError::Upload("no file selected".to_string()));
    }
    if upload.bytes.is_empty() {
        return Err(SnaptextError::Upload("uploaded image is empty".to_string()));
    }
    Ok(upload)
}

/// Liveness data returned by `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub provider: String,
    pub preprocessing: bool,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider: state.ocr.backend_name().to_string(),
        preprocessing: state.config.preprocess.enabled,
    })
}
