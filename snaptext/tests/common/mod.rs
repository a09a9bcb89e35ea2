use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::http::header::CONTENT_TYPE;
use image::{GrayImage, ImageFormat, Luma};
use snaptext::api::{AppState, create_router};
use snaptext::config::{Config, OcrConfig, PreprocessConfig, ServerConfig};
use snaptext::ocr::OcrProvider;
use std::io::Cursor;

pub const BOUNDARY: &str = "snaptext-test-boundary";

pub fn test_config(provider: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_upload_bytes: 20 * 1024 * 1024,
        },
        ocr: OcrConfig {
            provider: provider.to_string(),
            api_key: Some("test-key".to_string()),
            base_url: None,
            language: None,
            engine: None,
            timeout_secs: 5,
        },
        preprocess: PreprocessConfig {
            enabled: false,
            window: 11,
            offset: 2,
        },
    }
}

pub fn app_with(config: Config) -> Router {
    let ocr = OcrProvider::new(&config.ocr);
    create_router(AppState::new(config, ocr))
}

/// Assemble a single-part multipart body by hand so malformed shapes (missing
/// filename, empty filename) can be expressed exactly.
pub fn multipart_image_body(field_name: &str, file_name: Option<&str>, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    match file_name {
        Some(name) => {
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{name}\"\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
        }
        None => {
            body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{field_name}\"\r\n\r\n").as_bytes(),
            );
        }
    }
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// A bright gray page with a dark square, encoded as PNG.
pub fn sample_png() -> Vec<u8> {
    let image = GrayImage::from_fn(64, 64, |x, y| {
        if (20..44).contains(&x) && (20..44).contains(&y) {
            Luma([20u8])
        } else {
            Luma([200u8])
        }
    });
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
