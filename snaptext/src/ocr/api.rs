//! HTTP clients for the supported OCR backends.
//!
//! Each client owns a pre-configured [`reqwest::Client`] with the request
//! timeout baked in, translates transport and HTTP-level failures into
//! [`SnaptextError`] variants, and reduces the provider's response body to the
//! recognized text.

use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::{multipart, Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::OcrConfig;
use crate::error::{Result, SnaptextError};

pub const OCR_SPACE_BASE_URL: &str = "https://api.ocr.space";
pub const CLOUD_VISION_BASE_URL: &str = "https://vision.googleapis.com";

const OCR_SPACE_DEFAULT_LANGUAGE: &str = "eng";

fn build_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| SnaptextError::Transport(format!("failed to build HTTP client: {e}")))
}

fn transport_error(e: reqwest::Error, timeout_secs: u64) -> SnaptextError {
    if e.is_timeout() {
        SnaptextError::Timeout(timeout_secs)
    } else {
        SnaptextError::Transport(format!("request failed: {e}"))
    }
}

fn http_error(status: StatusCode, body: &str) -> SnaptextError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            SnaptextError::Transport(format!("provider rejected the request ({status}): {body}"))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            SnaptextError::Transport(format!("provider rate limit exceeded ({status}): {body}"))
        }
        _ => SnaptextError::Transport(format!("provider returned {status}: {body}")),
    }
}

fn infer_mime_type(file_name: &str) -> &'static str {
    let extension = file_name.rsplit('.').next().unwrap_or("");
    match extension.to_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        _ => "image/png",
    }
}

/// Client for the ocr.space parse API.
#[derive(Clone, Debug)]
pub struct OcrSpaceClient {
    client: Client,
    api_key: String,
    base_url: String,
    language: String,
    engine: Option<String>,
    timeout_secs: u64,
}

impl OcrSpaceClient {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| SnaptextError::Credential("OCR_SPACE_API_KEY is not set".to_string()))?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| OCR_SPACE_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client: build_client(config.timeout_secs)?,
            api_key,
            base_url,
            language: config
                .language
                .clone()
                .unwrap_or_else(|| OCR_SPACE_DEFAULT_LANGUAGE.to_string()),
            engine: config.engine.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Submit image bytes and return the recognized text, or an empty string
    /// when the provider found nothing.
    pub async fn recognize(&self, image_bytes: &[u8], file_name: &str) -> Result<String> {
        let url = format!("{}/parse/image", self.base_url);

        let part = multipart::Part::bytes(image_bytes.to_vec())
            .file_name(file_name.to_string())
            .mime_str(infer_mime_type(file_name))
            .map_err(|e| SnaptextError::Transport(format!("failed to build request: {e}")))?;

        let mut form = multipart::Form::new()
            .text("apikey", self.api_key.clone())
            .text("language", self.language.clone())
            .part("file", part);
        if let Some(engine) = &self.engine {
            form = form.text("OCREngine", engine.clone());
        }

        debug!("Sending OCR request to {url}");
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(http_error(status, &body));
        }

        let parsed: OcrSpaceResponse = response
            .json()
            .await
            .map_err(|e| SnaptextError::Transport(format!("invalid provider response: {e}")))?;
        parsed.into_text()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OcrSpaceResponse {
    #[serde(default)]
    is_errored_on_processing: bool,
    #[serde(default)]
    parsed_results: Vec<ParsedResult>,
    #[serde(default)]
    error_message: Option<ErrorMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParsedResult {
    #[serde(default)]
    parsed_text: String,
}

/// ocr.space returns `ErrorMessage` as either a string or a list of strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessage {
    fn joined(&self) -> String {
        match self {
            ErrorMessage::One(message) => message.clone(),
            ErrorMessage::Many(messages) => messages.join("; "),
        }
    }
}

impl OcrSpaceResponse {
    fn into_text(self) -> Result<String> {
        if self.is_errored_on_processing {
            let detail = self
                .error_message
                .as_ref()
                .map(ErrorMessage::joined)
                .unwrap_or_default();
            // An error flag without any detail reads as "nothing recognized"
            // rather than a reportable failure.
            if detail.trim().is_empty() {
                return Ok(String::new());
            }
            return Err(SnaptextError::Provider(detail));
        }

        let text = self
            .parsed_results
            .iter()
            .map(|result| result.parsed_text.trim_end())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        Ok(text)
    }
}

/// Client for the Google Cloud Vision images:annotate API, using document
/// text detection.
#[derive(Clone, Debug)]
pub struct CloudVisionClient {
    client: Client,
    api_key: String,
    base_url: String,
    language: Option<String>,
    timeout_secs: u64,
}

impl CloudVisionClient {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            SnaptextError::Credential("CLOUD_VISION_API_KEY is not set".to_string())
        })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| CLOUD_VISION_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client: build_client(config.timeout_secs)?,
            api_key,
            base_url,
            language: config.language.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub async fn recognize(&self, image_bytes: &[u8]) -> Result<String> {
        let url = format!("{}/v1/images:annotate", self.base_url);

        let request = AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: STANDARD.encode(image_bytes),
                },
                features: vec![Feature {
                    feature_type: "DOCUMENT_TEXT_DETECTION",
                }],
                image_context: self.language.clone().map(|language| ImageContext {
                    language_hints: vec![language],
                }),
            }],
        };

        debug!("Sending OCR request to {url}");
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(http_error(status, &body));
        }

        let parsed: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| SnaptextError::Transport(format!("invalid provider response: {e}")))?;
        parsed.into_text()
    }
}

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_context: Option<ImageContext>,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    feature_type: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageContext {
    language_hints: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    full_text_annotation: Option<FullTextAnnotation>,
    error: Option<VisionStatus>,
}

#[derive(Debug, Deserialize)]
struct FullTextAnnotation {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct VisionStatus {
    #[serde(default)]
    message: String,
}

impl AnnotateResponse {
    fn into_text(self) -> Result<String> {
        let Some(first) = self.responses.into_iter().next() else {
            return Ok(String::new());
        };
        if let Some(error) = &first.error {
            if !error.message.trim().is_empty() {
                return Err(SnaptextError::Provider(error.message.clone()));
            }
        }
        Ok(first
            .full_text_annotation
            .map(|annotation| annotation.text)
            .unwrap_or_default())
    }
}
