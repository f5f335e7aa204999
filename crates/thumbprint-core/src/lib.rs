//! Thumbprint Core - placeholder and fingerprint image engine
//!
//! This crate turns raw image bytes into lazy-loading artifacts: a tiny
//! re-encoded preview wrapped as a base64 data URI together with an
//! average color and source metadata, a short deterministic content
//! fingerprint of the decoded pixels, and caller-driven resizes.
//!
//! Every entry point is a pure synchronous function of its input bytes:
//! no caches, no configuration, no state shared between calls, and no
//! panics across the public boundary. Binding layers (wasm, FFI, CLI) are
//! expected to live in sibling crates and marshal the plain records
//! returned here.

pub mod color;
pub mod decode;
pub mod encode;
pub mod fingerprint;
pub mod resample;

pub use decode::{decode, DecodeError, DecodedImage, ImageKind};
pub use encode::{data_uri, encode_pixels, encode_placeholder, EncodeError};
pub use fingerprint::fingerprint;
pub use resample::FitMode;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Any failure a pipeline stage can surface through the entry points.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Source image dimensions and MIME type reported alongside a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageMetadata {
    /// Width of the decoded source in pixels (not the placeholder's).
    pub width: u32,
    /// Height of the decoded source in pixels (not the placeholder's).
    pub height: u32,
    /// MIME string of the detected source format, e.g. `image/jpeg`.
    pub format: String,
}

/// Result envelope for [`image_placeholder`].
///
/// On success `average`, `base64` and `metadata` are populated and `error`
/// is `None`; on failure only `error` is populated. Never both.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct PlaceholderResult {
    /// Average color of the decoded source as `#rrggbbaa`.
    pub average: Option<String>,
    /// Placeholder as a `data:<mime>;base64,<payload>` URI.
    pub base64: Option<String>,
    /// Decoded source dimensions and format.
    pub metadata: Option<ImageMetadata>,
    /// Failure description.
    pub error: Option<String>,
}

impl PlaceholderResult {
    fn failure(message: String) -> Self {
        Self {
            average: None,
            base64: None,
            metadata: None,
            error: Some(message),
        }
    }
}

/// Generate a placeholder record for raw image bytes.
///
/// Decodes the bytes once, then derives the average color and the
/// downscaled re-encoded preview from the same pixels. Any stage failure
/// is reported through the `error` field; this function never panics or
/// returns a partial record.
pub fn image_placeholder(image_bytes: &[u8]) -> PlaceholderResult {
    match placeholder_record(image_bytes) {
        Ok(result) => result,
        Err(error) => PlaceholderResult::failure(error.to_string()),
    }
}

fn placeholder_record(image_bytes: &[u8]) -> Result<PlaceholderResult, Error> {
    let image = decode::decode(image_bytes)?;
    let average = color::rgba_hex(color::average_color(&image));
    let placeholder = encode::encode_placeholder(&image)?;
    let mime_type = image.kind.mime_type();

    Ok(PlaceholderResult {
        average: Some(average),
        base64: Some(encode::data_uri(mime_type, &placeholder)),
        metadata: Some(ImageMetadata {
            width: image.width,
            height: image.height,
            format: mime_type.to_string(),
        }),
        error: None,
    })
}

/// Derive the content fingerprint of raw image bytes.
///
/// Decodes the bytes and hashes the pixels (see [`fingerprint`]); the
/// result is always 12 lowercase hex characters. Undecodable input fails
/// with the typed error rather than a sentinel string, so callers can
/// never mistake a failure for a valid fingerprint.
pub fn input_image_hash(image_bytes: &[u8]) -> Result<String, Error> {
    let image = decode::decode(image_bytes)?;
    Ok(fingerprint::fingerprint(&image)?)
}

/// Caller-facing options for [`resize_image`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ResizeOptions {
    /// Target width in pixels; derived from `height` when absent.
    pub width: Option<u32>,
    /// Target height in pixels; derived from `width` when absent.
    pub height: Option<u32>,
    /// How a full `width x height` box is reconciled with the source
    /// aspect ratio.
    #[serde(default)]
    pub fit: FitMode,
}

/// Result envelope for [`resize_image`], with the same success-or-error
/// field discipline as [`PlaceholderResult`].
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ResizeResult {
    /// Resized image re-encoded in the source format.
    pub image_bytes: Option<Vec<u8>>,
    /// MIME string of the source (and output) format.
    pub mime_type: Option<String>,
    /// Failure description.
    pub error: Option<String>,
}

impl ResizeResult {
    fn failure(message: String) -> Self {
        Self {
            image_bytes: None,
            mime_type: None,
            error: Some(message),
        }
    }
}

/// Resize raw image bytes per `options` and re-encode in the source
/// format.
///
/// Dimension handling is described on [`ResizeOptions`] and
/// [`resample::output_dimensions`]. Failures, including a requested
/// dimension of zero, are reported through the `error` field.
pub fn resize_image(image_bytes: &[u8], options: ResizeOptions) -> ResizeResult {
    match resize_record(image_bytes, options) {
        Ok(result) => result,
        Err(error) => ResizeResult::failure(error.to_string()),
    }
}

fn resize_record(image_bytes: &[u8], options: ResizeOptions) -> Result<ResizeResult, Error> {
    let image = decode::decode(image_bytes)?;
    let (width, height) = resample::output_dimensions(
        image.width,
        image.height,
        options.width,
        options.height,
        options.fit,
    );
    let resized = resample::resize(&image, width, height)?;
    let bytes = encode::encode_pixels(&resized.pixels, resized.width, resized.height, resized.kind)?;

    Ok(ResizeResult {
        image_bytes: Some(bytes),
        mime_type: Some(image.kind.mime_type().to_string()),
        error: None,
    })
}
