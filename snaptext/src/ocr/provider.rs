use std::time::Duration;

use tracing::{info, warn};

use crate::config::OcrConfig;
use crate::error::{Result, SnaptextError};

use super::api::{CloudVisionClient, OcrSpaceClient};

#[derive(Clone)]
enum OcrBackend {
    OcrSpace(OcrSpaceClient),
    CloudVision(CloudVisionClient),
    /// Selected at startup when no backend could be constructed. The server
    /// stays up; uploads fail with the stored reason until it is fixed.
    Unavailable {
        reason: String,
    },
}

/// Text recognition facade over the configured backend.
///
/// Construction never fails: a missing credential or an unknown provider name
/// degrades to [`OcrBackend::Unavailable`] so the server can still start and
/// report the problem per request.
#[derive(Clone)]
pub struct OcrProvider {
    backend: OcrBackend,
    config: OcrConfig,
}

impl OcrProvider {
    pub fn new(config: &OcrConfig) -> Self {
        let backend = match config.provider.to_lowercase().as_str() {
            "ocr-space" => match OcrSpaceClient::new(config) {
                Ok(client) => {
                    info!("Using ocr.space backend for text recognition");
                    OcrBackend::OcrSpace(client)
                }
                Err(e) => unavailable("ocr.space", e),
            },
            "cloud-vision" => match CloudVisionClient::new(config) {
                Ok(client) => {
                    info!("Using Cloud Vision backend for text recognition");
                    OcrBackend::CloudVision(client)
                }
                Err(e) => unavailable("Cloud Vision", e),
            },
            other => {
                warn!("Unknown OCR provider '{other}'");
                OcrBackend::Unavailable {
                    reason: format!("unknown OCR provider '{other}'"),
                }
            }
        };

        Self {
            backend,
            config: config.clone(),
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, OcrBackend::Unavailable { .. })
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            OcrBackend::OcrSpace(_) => "ocr-space",
            OcrBackend::CloudVision(_) => "cloud-vision",
            OcrBackend::Unavailable { .. } => "unavailable",
        }
    }

    /// Recognize text in the given image, bounded by the configured timeout.
    pub async fn recognize(&self, image_bytes: &[u8], file_name: &str) -> Result<String> {
        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        match tokio::time::timeout(timeout_duration, self.recognize_inner(image_bytes, file_name))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(SnaptextError::Timeout(self.config.timeout_secs)),
        }
    }

    async fn recognize_inner(&self, image_bytes: &[u8], file_name: &str) -> Result<String> {
        match &self.backend {
            OcrBackend::OcrSpace(client) => client.recognize(image_bytes, file_name).await,
            OcrBackend::CloudVision(client) => client.recognize(image_bytes).await,
            OcrBackend::Unavailable { reason } => Err(SnaptextError::Credential(reason.clone())),
        }
    }
}

fn unavailable(provider: &str, e: SnaptextError) -> OcrBackend {
    let reason = match e {
        SnaptextError::Credential(message) => message,
        other => other.to_string(),
    };
    warn!("{provider} backend unavailable: {reason}");
    OcrBackend::Unavailable { reason }
}
