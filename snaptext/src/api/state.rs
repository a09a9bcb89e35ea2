use std::sync::Arc;

use crate::config::Config;
use crate::ocr::OcrProvider;

/// Shared application state, cloned cheaply into each handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ocr: OcrProvider,
}

impl AppState {
    pub fn new(config: Config, ocr: OcrProvider) -> Self {
        Self {
            config: Arc::new(config),
            ocr,
        }
    }
}
