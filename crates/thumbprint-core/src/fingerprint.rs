//! Content fingerprinting over decoded pixels.
//!
//! The fingerprint is a gradient hash: the image is resampled to a small
//! fixed luma grid and each bit records whether brightness increases
//! between horizontally adjacent samples. It reads only decoded pixel
//! values, never the compressed byte stream, so re-encodings that decode
//! to the same pixels fingerprint identically, and the fixed grid makes
//! it tolerant of resolution changes.

use crate::decode::DecodedImage;
use crate::encode::EncodeError;
use crate::resample;

/// Comparisons per grid row; the sample grid is one column wider.
const GRID_COLS: u32 = 8;

/// Grid rows. GRID_COLS * GRID_ROWS is the fingerprint width in bits.
const GRID_ROWS: u32 = 6;

/// ITU-R BT.709 luma coefficients.
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

#[inline]
fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let lum = LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32;
    lum.clamp(0.0, 255.0).round() as u8
}

/// Derive the 48-bit gradient fingerprint of a decoded image, rendered as
/// exactly 12 lowercase hex characters.
///
/// Bit layout: rows top to bottom, comparisons left to right, first bit
/// in the most significant position. A bit is set when the left sample is
/// darker than its right neighbour. Alpha is ignored.
///
/// # Errors
///
/// Fails only when the pixel buffer violates the `DecodedImage` length
/// invariant.
pub fn fingerprint(image: &DecodedImage) -> Result<String, EncodeError> {
    let grid = resample::resize(image, GRID_COLS + 1, GRID_ROWS)?;

    let luma: Vec<u8> = grid
        .pixels
        .chunks_exact(4)
        .map(|px| luma_u8(px[0], px[1], px[2]))
        .collect();

    let cols = (GRID_COLS + 1) as usize;
    let mut bits: u64 = 0;
    for row in 0..GRID_ROWS as usize {
        for col in 0..GRID_COLS as usize {
            let left = luma[row * cols + col];
            let right = luma[row * cols + col + 1];
            bits = (bits << 1) | u64::from(left < right);
        }
    }

    Ok(format!("{bits:012x}"))
}
