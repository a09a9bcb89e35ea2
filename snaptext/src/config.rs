use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Look up the credential environment variable for a provider name.
fn credential_for(provider: &str) -> Option<String> {
    match provider.to_lowercase().as_str() {
        "ocr-space" => env::var("OCR_SPACE_API_KEY").ok(),
        "cloud-vision" => env::var("CLOUD_VISION_API_KEY").ok(),
        _ => None,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
    pub preprocess: PreprocessConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// Which backend to use: "ocr-space" or "cloud-vision".
    pub provider: String,
    /// Credential for the selected backend, read from its environment
    /// variable at startup. `None` leaves the server up but rejecting uploads.
    pub api_key: Option<String>,
    /// Override the provider endpoint, mainly for tests.
    pub base_url: Option<String>,
    /// Language hint forwarded to the provider when set.
    pub language: Option<String>,
    /// ocr.space engine selector (1-3), omitted from requests when unset.
    pub engine: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreprocessConfig {
    pub enabled: bool,
    /// Side length of the local thresholding neighborhood, in pixels.
    pub window: u32,
    /// Constant subtracted from the local mean before comparison.
    pub offset: i16,
}

impl Default for Config {
    fn default() -> Self {
        let provider = env::var("OCR_PROVIDER").unwrap_or_else(|_| "ocr-space".to_string());
        let api_key = credential_for(&provider);

        Self {
            server: ServerConfig {
                host: env::var("SNAPTEXT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("SNAPTEXT_PORT", 5000),
                max_upload_bytes: parse_env_or("SNAPTEXT_MAX_UPLOAD_BYTES", 20 * 1024 * 1024),
            },
            ocr: OcrConfig {
                provider,
                api_key,
                base_url: env::var("OCR_BASE_URL").ok(),
                language: env::var("OCR_LANGUAGE").ok(),
                engine: env::var("OCR_ENGINE").ok(),
                timeout_secs: parse_env_or("OCR_TIMEOUT", 30),
            },
            preprocess: PreprocessConfig {
                enabled: parse_env_or("OCR_PREPROCESS", false),
                window: parse_env_or("OCR_PREPROCESS_WINDOW", 11),
                offset: parse_env_or("OCR_PREPROCESS_OFFSET", 2),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
