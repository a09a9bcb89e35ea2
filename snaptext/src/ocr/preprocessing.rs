use crate::config::PreprocessConfig;
use crate::error::{Result, SnaptextError};
use image::{GrayImage, ImageFormat, ImageReader, Luma};
use imageproc::filter::box_filter;
use std::io::Cursor;

/// Binarize image bytes before OCR
///
/// Applies the following transformations:
/// 1. Decodes the upload, sniffing the actual format from the bytes
/// 2. Converts to single-channel grayscale
/// 3. Thresholds each pixel against the mean of its surrounding window
///    minus a constant offset (at or above the level becomes white, the
///    rest black)
/// 4. Re-encodes losslessly as PNG
///
/// # Arguments
/// * `bytes` - Raw image bytes (PNG, JPEG, etc.)
/// * `config` - Neighborhood size and offset for the thresholding step
///
/// # Returns
/// Binarized image bytes as PNG, containing only the values 0 and 255
pub fn binarize(bytes: &[u8], config: &PreprocessConfig) -> Result<Vec<u8>> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| SnaptextError::Preprocess(format!("failed to read image: {e}")))?;
    let image = reader
        .decode()
        .map_err(|e| SnaptextError::Preprocess(format!("failed to decode image: {e}")))?;

    let gray = image.to_luma8();
    let binary = threshold_against_local_mean(&gray, config.window, config.offset);

    let mut output = Vec::new();
    binary
        .write_to(&mut Cursor::new(&mut output), ImageFormat::Png)
        .map_err(|e| SnaptextError::Preprocess(format!("failed to encode image: {e}")))?;
    Ok(output)
}

fn threshold_against_local_mean(gray: &GrayImage, window: u32, offset: i16) -> GrayImage {
    let radius = sanitize_window(window) / 2;
    let means = box_filter(gray, radius, radius);

    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let pixel = gray.get_pixel(x, y)[0] as i16;
        let mean = means.get_pixel(x, y)[0] as i16;
        if pixel >= mean - offset {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

/// Clamp the neighborhood to an odd side length of at least 3 so the window
/// is centered on the pixel being thresholded.
fn sanitize_window(window: u32) -> u32 {
    let window = window.max(3);
    if window % 2 == 0 {
        window + 1
    } else {
        window
    }
}
