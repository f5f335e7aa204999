//! Average color extraction.

use crate::decode::DecodedImage;

/// Compute the per-channel arithmetic mean over every pixel, RGBA order.
///
/// Accumulates in u64, which stays exact far beyond 2^24 pixels, and
/// rounds half-up. This is a flat mean: no weighting, no color-space
/// conversion. Sources without an alpha channel decode with alpha 255, so
/// their mean alpha is exactly 255.
pub fn average_color(image: &DecodedImage) -> [u8; 4] {
    let count = image.pixel_count();
    if count == 0 {
        return [0; 4];
    }

    let mut sums = [0u64; 4];
    for px in image.pixels.chunks_exact(4) {
        for (sum, &channel) in sums.iter_mut().zip(px) {
            *sum += u64::from(channel);
        }
    }

    let mut channels = [0u8; 4];
    for (channel, sum) in channels.iter_mut().zip(sums) {
        // Round-half-up integer division keeps the mean exact
        *channel = ((2 * sum + count) / (2 * count)) as u8;
    }
    channels
}

/// Format an RGBA color as `#rrggbbaa`, lowercase, zero-padded.
pub fn rgba_hex(rgba: [u8; 4]) -> String {
    let [r, g, b, a] = rgba;
    format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
}
