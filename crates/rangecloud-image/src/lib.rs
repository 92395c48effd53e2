#![deny(missing_docs)]
//! Range image types for 16-bit depth sensors

/// range image representation for 3D profilers.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{ByteOrder, ImageSize, RangeImage};
