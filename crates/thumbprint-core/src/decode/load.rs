//! Decoding raw bytes into canonical RGBA pixels.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;

use super::{DecodeError, DecodedImage, ImageKind};

/// Decode raw image bytes into a `DecodedImage`.
///
/// The codec is sniffed from the byte signature and the payload is decoded
/// with that codec pinned, so an unrecognized signature and a recognized
/// but unparseable payload stay distinct errors. JPEG inputs have their
/// EXIF orientation applied before canonicalizing, so the reported
/// dimensions and pixel order match the image as displayed. Animated GIFs
/// decode as their first frame.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedFormat` when no supported signature
/// matches, and `DecodeError::CorruptImage` when the payload fails to
/// parse or decompress.
pub fn decode(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let kind = ImageKind::from_signature(bytes).ok_or(DecodeError::UnsupportedFormat)?;

    let img = image::load_from_memory_with_format(bytes, kind.to_image_format())
        .map_err(|e| DecodeError::CorruptImage(e.to_string()))?;

    let img = match kind {
        ImageKind::Jpeg => apply_orientation(img, extract_orientation(bytes)),
        _ => img,
    };

    Ok(DecodedImage::from_rgba_image(img.into_rgba8(), kind))
}

/// Extract the EXIF orientation value (1-8) from raw bytes.
///
/// Returns 1 (normal) when there is no EXIF segment or it cannot be read.
fn extract_orientation(bytes: &[u8]) -> u32 {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .unwrap_or(1),
        Err(_) => 1,
    }
}

/// Apply an EXIF orientation transformation to an image.
///
/// Values follow the EXIF Orientation tag; anything outside 2-8 is a
/// no-op.
fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}
