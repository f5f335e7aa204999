//! Image re-encoding pipeline.
//!
//! This module provides functionality for:
//! - Re-encoding canonical RGBA pixels in any supported codec
//! - Generating downscaled placeholder bytes in the source format
//! - Wrapping encoded bytes as base64 data URIs
//!
//! Every encoder setting is a constant, so identical pixels always
//! produce identical bytes.

mod formats;
mod placeholder;

pub use formats::{encode_pixels, EncodeError};
pub use placeholder::{data_uri, encode_placeholder};
