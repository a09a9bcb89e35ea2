//! Text recognition backends and the image preprocessing that feeds them.
//!
//! The backend is chosen once at startup from `OCR_PROVIDER`:
//!
//! - `ocr-space` (default), authenticated via `OCR_SPACE_API_KEY`
//! - `cloud-vision`, authenticated via `CLOUD_VISION_API_KEY`
//!
//! A missing credential or an unrecognized provider name does not abort
//! startup. The provider degrades to an unavailable state and every
//! recognition attempt reports the reason instead.
//!
//! ```rust,ignore
//! let provider = OcrProvider::new(&config.ocr);
//! let text = provider.recognize(&image_bytes, "scan.png").await?;
//! ```

mod api;
mod preprocessing;
mod provider;

pub use preprocessing::binarize;
pub use provider::OcrProvider;
