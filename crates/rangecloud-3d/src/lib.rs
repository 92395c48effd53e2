#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Per-axis calibration of range images.
pub mod calibration;

/// Point cloud container.
pub mod pointcloud;

/// Range image to point cloud conversion.
pub mod range;

pub use calibration::{Axis, AxisCalibration, CalibrationError, RangeCalibration};
pub use pointcloud::PointCloud;
pub use range::{build_point_cloud, build_point_cloud_with, ZeroFilter};
