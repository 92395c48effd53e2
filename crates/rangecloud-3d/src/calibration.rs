use serde::{Deserialize, Serialize};

/// Error types for the calibration module.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CalibrationError {
    /// The offset or the scale of an axis is NaN or infinite.
    #[error("Calibration of axis {axis} is not finite (offset: {offset}, scale: {scale})")]
    NonFinite {
        /// The offending axis.
        axis: Axis,
        /// The offset of the axis.
        offset: f64,
        /// The scale of the axis.
        scale: f64,
    },
}

/// The world axes of a range image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Along the columns of the range image.
    X,
    /// Along the rows of the range image.
    Y,
    /// Along the depth samples.
    Z,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
            Axis::Z => write!(f, "Z"),
        }
    }
}

/// Linear mapping from raw units to world units along one axis.
///
/// `world = raw * scale + offset`
///
/// For the X and Y axes the raw value is the pixel column and row; for the Z axis
/// it is the depth sample. A negative scale flips the axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisCalibration {
    /// Origin shift in world units.
    pub offset: f64,
    /// World units per raw unit.
    pub scale: f64,
}

impl AxisCalibration {
    /// Create a new axis calibration.
    pub fn new(offset: f64, scale: f64) -> Self {
        Self { offset, scale }
    }

    /// The calibration that leaves raw values untouched.
    pub fn identity() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Map a raw value to world units.
    #[inline]
    pub fn apply(&self, raw: f64) -> f64 {
        raw * self.scale + self.offset
    }

    fn is_finite(&self) -> bool {
        self.offset.is_finite() && self.scale.is_finite()
    }
}

impl Default for AxisCalibration {
    fn default() -> Self {
        Self::identity()
    }
}

/// The calibration of the three axes of a range image.
///
/// # Examples
///
/// ```
/// use rangecloud_3d::{AxisCalibration, RangeCalibration};
///
/// let calib = RangeCalibration {
///     z: AxisCalibration::new(0.0, 0.1),
///     ..Default::default()
/// };
///
/// assert_eq!(calib.z.apply(100.0), 10.0);
/// assert!(calib.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeCalibration {
    /// Calibration of the column axis.
    pub x: AxisCalibration,
    /// Calibration of the row axis.
    pub y: AxisCalibration,
    /// Calibration of the depth axis.
    pub z: AxisCalibration,
}

impl RangeCalibration {
    /// Create a new calibration from the three axes.
    pub fn new(x: AxisCalibration, y: AxisCalibration, z: AxisCalibration) -> Self {
        Self { x, y, z }
    }

    /// Get the calibration of the given axis.
    pub fn axis(&self, axis: Axis) -> &AxisCalibration {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    /// Check that every offset and scale is a finite number.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let calib = self.axis(axis);
            if !calib.is_finite() {
                return Err(CalibrationError::NonFinite {
                    axis,
                    offset: calib.offset,
                    scale: calib.scale,
                });
            }
        }
        Ok(())
    }
}
