//! Image decoding pipeline.
//!
//! This module provides functionality for:
//! - Sniffing the codec from leading byte signatures
//! - Decoding JPEG, PNG, WebP, GIF and BMP payloads
//! - Applying JPEG EXIF orientation
//! - Canonicalizing everything to RGBA pixel buffers
//!
//! Decoding is a pure function of the input bytes: no filesystem access,
//! no caches, no state shared between calls.

mod load;
mod types;

pub use load::decode;
pub use types::{DecodeError, DecodedImage, ImageKind};
