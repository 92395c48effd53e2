#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access, PNG encoding/decoding and
/// calibration parsing failures.
pub mod error;

/// Run time and frame rate measurement for frame processing loops.
pub mod frame_timer;

/// Calibration reading and writing in JSON.
pub mod calibration;

/// PNG range image encoding and decoding.
///
/// Read and write single channel 16-bit PNG images.
pub mod png;

/// Frame sources and the frame processing loop.
///
/// See [`stream::process_frames`] for the acquire, build and consume cycle.
pub mod stream;

pub use crate::error::IoError;
