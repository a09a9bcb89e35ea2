use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnaptextError {
    #[error("Invalid upload: {0}")]
    Upload(String),

    #[error("OCR unavailable: {0}")]
    Credential(String),

    #[error("OCR request failed: {0}")]
    Transport(String),

    #[error("OCR provider error: {0}")]
    Provider(String),

    #[error("OCR request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Image preprocessing failed: {0}")]
    Preprocess(String),
}

impl IntoResponse for SnaptextError {
    fn into_response(self) -> Response {
        let status = match &self {
            SnaptextError::Upload(_) => StatusCode::BAD_REQUEST,
            SnaptextError::Credential(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SnaptextError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SnaptextError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SnaptextError::Timeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SnaptextError::Preprocess(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Server error mapped to plain-text response");
        }

        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, SnaptextError>;
