//! Placeholder generation: downscale, re-encode, wrap as a data URI.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::formats::encode_pixels;
use super::EncodeError;
use crate::decode::DecodedImage;
use crate::resample;

/// Longest edge of a generated placeholder, in pixels.
///
/// Placeholders are progressive-loading stand-ins, so they only need
/// enough resolution to blur up; 32px keeps the data URI to a few hundred
/// bytes for typical photos.
pub(crate) const PLACEHOLDER_MAX_EDGE: u32 = 32;

/// Downscale an image to the placeholder bound and re-encode it in its
/// source format.
///
/// Sources already within the bound are re-encoded at their original
/// size; the placeholder is never an upscale.
///
/// # Errors
///
/// Returns `EncodeError` when resampling or re-encoding fails. Both take
/// a valid `DecodedImage`, so a failure here signals an internal invariant
/// violation rather than bad caller input; it is still surfaced as a value
/// instead of a panic.
pub fn encode_placeholder(image: &DecodedImage) -> Result<Vec<u8>, EncodeError> {
    let small = resample::resize_to_fit(image, PLACEHOLDER_MAX_EDGE)?;
    encode_pixels(&small.pixels, small.width, small.height, small.kind)
}

/// Wrap encoded image bytes as a `data:<mime>;base64,<payload>` URI.
///
/// Standard base64 alphabet, padding kept, no line wrapping.
pub fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ImageKind;

    fn create_test_image(width: u32, height: u32, kind: ImageKind) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(64);
                pixels.push(255);
            }
        }
        DecodedImage::new(width, height, pixels, kind)
    }

    #[test]
    fn test_placeholder_fits_bound() {
        let img = create_test_image(640, 480, ImageKind::Png);
        let bytes = encode_placeholder(&img).unwrap();

        let small = crate::decode::decode(&bytes).unwrap();
        assert_eq!(small.kind, ImageKind::Png);
        assert_eq!(small.width, 32);
        assert_eq!(small.height, 24);
    }

    #[test]
    fn test_placeholder_keeps_source_format() {
        let img = create_test_image(100, 75, ImageKind::Jpeg);
        let bytes = encode_placeholder(&img).unwrap();

        assert_eq!(ImageKind::from_signature(&bytes), Some(ImageKind::Jpeg));
    }

    #[test]
    fn test_placeholder_small_source_not_upscaled() {
        let img = create_test_image(10, 8, ImageKind::Png);
        let bytes = encode_placeholder(&img).unwrap();

        let small = crate::decode::decode(&bytes).unwrap();
        assert_eq!((small.width, small.height), (10, 8));
    }

    #[test]
    fn test_placeholder_deterministic() {
        let img = create_test_image(300, 200, ImageKind::Jpeg);
        assert_eq!(encode_placeholder(&img).unwrap(), encode_placeholder(&img).unwrap());
    }

    #[test]
    fn test_data_uri_shape() {
        assert_eq!(data_uri("image/png", b"abc"), "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_data_uri_keeps_padding() {
        assert_eq!(
            data_uri("image/png", b"abcd"),
            "data:image/png;base64,YWJjZA=="
        );
    }

    #[test]
    fn test_data_uri_jpeg_prefix() {
        // base64 of the JPEG SOI marker bytes
        assert_eq!(
            data_uri("image/jpeg", &[0xFF, 0xD8, 0xFF]),
            "data:image/jpeg;base64,/9j/"
        );
    }
}
