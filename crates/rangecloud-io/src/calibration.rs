use std::{fs, path::Path};

use rangecloud_3d::RangeCalibration;

use crate::error::IoError;

/// Read a range calibration from a JSON file.
///
/// The file holds one `{ "offset", "scale" }` object per axis:
///
/// ```json
/// { "x": { "offset": 0.0, "scale": 1.0 },
///   "y": { "offset": 0.0, "scale": 1.0 },
///   "z": { "offset": 0.0, "scale": 0.1 } }
/// ```
///
/// # Errors
///
/// Fails if the file is missing or is not valid JSON. JSON numbers are always finite,
/// so values that overflow an `f64` (such as `1e999`) are reported as parse errors.
pub fn read_calibration(file_path: impl AsRef<Path>) -> Result<RangeCalibration, IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let text = fs::read_to_string(file_path)?;
    let calibration: RangeCalibration = serde_json::from_str(&text)?;

    log::debug!(
        "loaded calibration from {}: {:?}",
        file_path.display(),
        calibration
    );

    Ok(calibration)
}

/// Write a range calibration to a JSON file.
pub fn write_calibration(
    file_path: impl AsRef<Path>,
    calibration: &RangeCalibration,
) -> Result<(), IoError> {
    let text = serde_json::to_string_pretty(calibration)?;
    fs::write(file_path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rangecloud_3d::AxisCalibration;

    #[test]
    fn read_write_calibration() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("calib.json");

        let calibration = RangeCalibration::new(
            AxisCalibration::new(-12.5, 0.05),
            AxisCalibration::new(0.0, 0.2),
            AxisCalibration::new(-50.0, 0.001),
        );
        write_calibration(&file_path, &calibration)?;

        let calibration_back = read_calibration(&file_path)?;
        assert_eq!(calibration_back, calibration);
        Ok(())
    }

    #[test]
    fn read_calibration_missing_axis() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("calib.json");
        fs::write(&file_path, r#"{ "x": { "offset": 0.0, "scale": 1.0 } }"#)?;

        let res = read_calibration(&file_path);
        assert!(matches!(res, Err(IoError::CalibrationParseError(_))));
        Ok(())
    }

    #[test]
    fn read_calibration_out_of_range() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("calib.json");
        fs::write(
            &file_path,
            r#"{ "x": { "offset": 0.0, "scale": 1.0 },
                 "y": { "offset": 0.0, "scale": 1.0 },
                 "z": { "offset": 0.0, "scale": 1e999 } }"#,
        )?;

        let res = read_calibration(&file_path);
        assert!(matches!(res, Err(IoError::CalibrationParseError(_))));
        Ok(())
    }
}
