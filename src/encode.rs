//! Reference image encoding for transport to the vision endpoint.
//!
//! Uploaded images arrive in arbitrary pixel modes. The endpoint expects a
//! base64 JPEG inside a data URL, so every image is normalized to RGB first
//! (alpha is discarded, palettes are expanded) and compressed at a fixed
//! quality setting. Decoding the upload is the caller's problem; this module
//! only re-encodes images that already decoded successfully.

use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

use crate::error::PromptError;

/// JPEG quality used for every transport encode. Fixed so that the same
/// input image always produces the same payload.
pub const JPEG_QUALITY: u8 = 95;

/// Encode an image as base64 JPEG bytes.
///
/// Images with an alpha channel or palette indexing are converted to
/// three-channel RGB first; the result is always opaque.
///
/// # Errors
///
/// Returns an error if JPEG serialization fails.
pub fn encode_jpeg_base64(image: &DynamicImage) -> Result<String, PromptError> {
    let rgb = image.to_rgb8();
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)
        .map_err(|e| PromptError::ImageEncode(format!("Failed to encode JPEG: {e}")))?;
    Ok(base64::engine::general_purpose::STANDARD.encode(&buf))
}

/// Encode an image as a `data:image/jpeg;base64,...` URL for embedding in a
/// completion request. The MIME type is always JPEG regardless of the
/// original upload format.
///
/// # Errors
///
/// Returns an error if JPEG serialization fails.
pub fn image_data_url(image: &DynamicImage) -> Result<String, PromptError> {
    Ok(format!("data:image/jpeg;base64,{}", encode_jpeg_base64(image)?))
}
