//! Re-encoding canonical RGBA pixels into the supported codecs.

use std::io::Cursor;

use image::codecs::bmp::BmpEncoder;
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use crate::decode::ImageKind;

/// Quality for every JPEG the engine produces. Fixed so re-encoding the
/// same pixels always yields the same bytes.
pub(crate) const JPEG_QUALITY: u8 = 90;

/// Errors that can occur while re-encoding pixels.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec rejected the image
    #[error("re-encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGBA pixel data as `kind` bytes.
///
/// JPEG output is flattened to RGB (the format has no alpha channel) at
/// the fixed [`JPEG_QUALITY`]. WebP output is lossless, which is the only
/// mode the image crate's encoder supports and also keeps the bytes
/// reproducible. All encoder settings are constants, so identical pixels
/// always produce identical bytes.
///
/// # Errors
///
/// Returns `InvalidDimensions`/`InvalidPixelData` when the buffer doesn't
/// describe a `width x height` RGBA image, and `EncodingFailed` when the
/// underlying codec reports an error.
pub fn encode_pixels(
    pixels: &[u8],
    width: u32,
    height: u32,
    kind: ImageKind,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    match kind {
        ImageKind::Jpeg => {
            let rgb = rgba_to_rgb(pixels);
            let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
            encoder
                .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        }
        ImageKind::Png => {
            let encoder = PngEncoder::new(&mut buffer);
            encoder
                .write_image(pixels, width, height, ExtendedColorType::Rgba8)
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        }
        ImageKind::WebP => {
            let encoder = WebPEncoder::new_lossless(&mut buffer);
            encoder
                .encode(pixels, width, height, ExtendedColorType::Rgba8)
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        }
        ImageKind::Gif => {
            let mut encoder = GifEncoder::new(&mut buffer);
            encoder
                .encode(pixels, width, height, ExtendedColorType::Rgba8)
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        }
        ImageKind::Bmp => {
            let mut encoder = BmpEncoder::new(&mut buffer);
            encoder
                .encode(pixels, width, height, ExtendedColorType::Rgba8)
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        }
    }

    Ok(buffer.into_inner())
}

/// Drop the alpha channel from an RGBA buffer.
fn rgba_to_rgb(pixels: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(pixels.len() / 4 * 3);
    for px in pixels.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }
    rgb
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=24, 1u32..=24)
    }

    fn kind_strategy() -> impl Strategy<Value = ImageKind> {
        prop_oneof![
            Just(ImageKind::Jpeg),
            Just(ImageKind::Png),
            Just(ImageKind::WebP),
            Just(ImageKind::Gif),
            Just(ImageKind::Bmp),
        ]
    }

    proptest! {
        /// Property: every codec encodes any valid RGBA buffer.
        #[test]
        fn prop_valid_input_encodes(
            (width, height) in dimensions_strategy(),
            kind in kind_strategy(),
        ) {
            let size = (width as usize) * (height as usize) * 4;
            let pixels: Vec<u8> = (0..size).map(|i| ((i * 37) % 256) as u8).collect();

            let result = encode_pixels(&pixels, width, height, kind);
            prop_assert!(result.is_ok(), "{:?} failed: {:?}", kind, result);
            prop_assert!(!result.unwrap().is_empty());
        }

        /// Property: encoded bytes sniff back to the codec that wrote them.
        #[test]
        fn prop_output_signature_matches_kind(
            (width, height) in dimensions_strategy(),
            kind in kind_strategy(),
        ) {
            let size = (width as usize) * (height as usize) * 4;
            let pixels = vec![128u8; size];

            let bytes = encode_pixels(&pixels, width, height, kind).unwrap();
            prop_assert_eq!(ImageKind::from_signature(&bytes), Some(kind));
        }

        /// Property: same input always produces same output (deterministic).
        #[test]
        fn prop_deterministic_output(
            (width, height) in dimensions_strategy(),
            kind in kind_strategy(),
        ) {
            let size = (width as usize) * (height as usize) * 4;
            let pixels: Vec<u8> = (0..size).map(|i| ((i * 13) % 256) as u8).collect();

            let first = encode_pixels(&pixels, width, height, kind).unwrap();
            let second = encode_pixels(&pixels, width, height, kind).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: mismatched buffer lengths are always rejected.
        #[test]
        fn prop_invalid_pixel_length_rejected(
            (width, height) in dimensions_strategy(),
            kind in kind_strategy(),
            delta in prop_oneof![Just(-1i64), Just(1i64), Just(4i64), Just(-4i64)],
        ) {
            let expected = (width as i64) * (height as i64) * 4;
            let actual = (expected + delta).max(0) as usize;
            prop_assume!(actual as i64 != expected);

            let pixels = vec![0u8; actual];
            let result = encode_pixels(&pixels, width, height, kind);
            let is_invalid_pixel_data = matches!(result, Err(EncodeError::InvalidPixelData { .. }));
            prop_assert!(is_invalid_pixel_data);
        }
    }
}
