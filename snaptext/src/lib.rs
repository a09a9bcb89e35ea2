//! Snaptext turns an uploaded image into an HTML page of its recognized text.
//!
//! The service exposes a single processing endpoint, `POST /process-image`,
//! which validates the multipart upload, optionally binarizes the image to
//! help the OCR engine, and delegates recognition to an external provider
//! (ocr.space or Google Cloud Vision). Recognized text comes back verbatim
//! inside a `<pre>` block; failures come back as plain-text diagnostics.

pub mod api;
pub mod config;
pub mod error;
pub mod ocr;
pub mod render;

pub use config::Config;
pub use error::{Result, SnaptextError};
