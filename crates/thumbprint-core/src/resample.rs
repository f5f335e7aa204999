//! Image resampling with a pinned filter and pinned dimension arithmetic.
//!
//! Every resample in the engine goes through this module, so the filter
//! choice and rounding rules stay identical across the placeholder,
//! fingerprint and resize paths. All functions return new `DecodedImage`
//! instances without modifying the input.

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;
use crate::encode::EncodeError;

/// Filter used for every resample the engine performs.
///
/// Triangle (bilinear) is pinned: output bytes must be reproducible, and
/// preview-sized targets gain nothing visible from a heavier kernel.
const RESAMPLE_FILTER: image::imageops::FilterType = image::imageops::FilterType::Triangle;

/// How a requested `width x height` box is reconciled with the source
/// aspect ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Largest aspect-preserving size that fits inside the box.
    #[default]
    Clip,
    /// Exactly the requested box, aspect ratio ignored.
    Stretch,
}

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for a zero target dimension
/// and `EncodeError::InvalidPixelData` when the source buffer violates the
/// `DecodedImage` length invariant.
pub fn resize(image: &DecodedImage, width: u32, height: u32) -> Result<DecodedImage, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgba = image
        .to_rgba_image()
        .ok_or(EncodeError::InvalidPixelData {
            expected: (image.width as usize) * (image.height as usize) * 4,
            actual: image.pixels.len(),
        })?;

    let resized = image::imageops::resize(&rgba, width, height, RESAMPLE_FILTER);

    Ok(DecodedImage::from_rgba_image(resized, image.kind))
}

/// Resize an image so its longest edge is at most `max_edge`, preserving
/// aspect ratio. A source already within the bound is returned unchanged;
/// this function never upscales.
pub fn resize_to_fit(image: &DecodedImage, max_edge: u32) -> Result<DecodedImage, EncodeError> {
    if max_edge == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: max_edge,
            height: max_edge,
        });
    }

    // If already fits, just clone
    if image.width <= max_edge && image.height <= max_edge {
        return Ok(image.clone());
    }

    let (width, height) = fit_dimensions(image.width, image.height, max_edge);
    resize(image, width, height)
}

/// Calculate dimensions to fit within max_edge while preserving aspect
/// ratio. The constrained edge becomes exactly max_edge; the other is
/// rounded to nearest and clamped to at least 1.
fn fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}

/// Compute the output dimensions for a caller-requested resize.
///
/// With one target dimension, the free axis scales by the source aspect
/// ratio. With both, `fit` decides: `Clip` contains the source within the
/// box, `Stretch` takes the box verbatim. With neither, the source
/// dimensions pass through. A requested dimension of zero propagates to
/// the output, where [`resize`] rejects it.
pub fn output_dimensions(
    src_width: u32,
    src_height: u32,
    width: Option<u32>,
    height: Option<u32>,
    fit: FitMode,
) -> (u32, u32) {
    let ratio = src_width as f64 / src_height as f64;

    match (width, height) {
        (None, None) => (src_width, src_height),
        (Some(w), None) => {
            let h = (w as f64 / ratio).round() as u32;
            (w, if w == 0 { 0 } else { h.max(1) })
        }
        (None, Some(h)) => {
            let w = (h as f64 * ratio).round() as u32;
            (if h == 0 { 0 } else { w.max(1) }, h)
        }
        (Some(w), Some(h)) => match fit {
            FitMode::Stretch => (w, h),
            FitMode::Clip => {
                if w == 0 || h == 0 {
                    return (w, h);
                }
                let scale = (w as f64 / src_width as f64).min(h as f64 / src_height as f64);
                let out_w = ((src_width as f64 * scale).round() as u32).max(1);
                let out_h = ((src_height as f64 * scale).round() as u32).max(1);
                (out_w.min(w), out_h.min(h))
            }
        },
    }
}
