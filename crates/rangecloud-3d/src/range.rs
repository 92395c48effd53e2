use rangecloud_image::RangeImage;

use crate::calibration::{AxisCalibration, RangeCalibration};
use crate::pointcloud::PointCloud;

/// Which samples of a range image are dropped when building a point cloud.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZeroFilter {
    /// Drop pixels whose raw sample is `0`.
    RawOnly,
    /// Drop pixels whose raw sample is `0` and pixels whose world depth is exactly `0.0`.
    #[default]
    RawAndWorld,
}

impl ZeroFilter {
    #[inline]
    fn keeps_world_z(&self, z: f64) -> bool {
        match self {
            ZeroFilter::RawOnly => true,
            ZeroFilter::RawAndWorld => z != 0.0,
        }
    }
}

/// Build a point cloud from a range image and the calibration of its three axes.
///
/// Every pixel `(row, col)` holding a non-zero sample `d` produces the point
///
/// ```text
/// x = col * calib_x.scale + calib_x.offset
/// y = row * calib_y.scale + calib_y.offset
/// z = d   * calib_z.scale + calib_z.offset
/// ```
///
/// Pixels whose raw sample is `0` never produce a point, whatever the offsets are.
/// Points whose world depth ends up being exactly `0.0` are dropped as well; use
/// [`build_point_cloud_with`] and [`ZeroFilter::RawOnly`] to keep them.
///
/// # Arguments
///
/// * `range_image` - The range image.
/// * `calib_x` - The calibration of the column axis.
/// * `calib_y` - The calibration of the row axis.
/// * `calib_z` - The calibration of the depth axis.
///
/// # Returns
///
/// The points of the valid pixels in row-major scan order.
///
/// # Examples
///
/// ```
/// use rangecloud_3d::{build_point_cloud, AxisCalibration};
/// use rangecloud_image::RangeImage;
///
/// let image = RangeImage::new([2, 2].into(), vec![0, 100, 200, 0]).unwrap();
/// let unit = AxisCalibration::identity();
///
/// let cloud = build_point_cloud(&image, &unit, &unit, &AxisCalibration::new(0.0, 0.1));
///
/// assert_eq!(cloud.len(), 2);
/// assert_eq!(cloud.points()[0], [1.0, 0.0, 10.0]);
/// assert_eq!(cloud.points()[1], [0.0, 1.0, 20.0]);
/// ```
pub fn build_point_cloud(
    range_image: &RangeImage,
    calib_x: &AxisCalibration,
    calib_y: &AxisCalibration,
    calib_z: &AxisCalibration,
) -> PointCloud {
    build_point_cloud_with(
        range_image,
        &RangeCalibration::new(*calib_x, *calib_y, *calib_z),
        ZeroFilter::default(),
    )
}

/// Build a point cloud from a range image with an explicit zero filter.
///
/// # Arguments
///
/// * `range_image` - The range image.
/// * `calibration` - The calibration of the three axes.
/// * `filter` - Which samples to drop.
///
/// # Returns
///
/// The points of the kept pixels in row-major scan order.
pub fn build_point_cloud_with(
    range_image: &RangeImage,
    calibration: &RangeCalibration,
    filter: ZeroFilter,
) -> PointCloud {
    let mut cloud = PointCloud::with_capacity(range_image.valid_count());

    for (row, samples) in range_image.rows().enumerate() {
        let y = calibration.y.apply(row as f64);
        for (col, &d) in samples.iter().enumerate() {
            if d == 0 {
                continue;
            }

            let z = calibration.z.apply(d as f64);
            if !filter.keeps_world_z(z) {
                continue;
            }

            cloud.push([calibration.x.apply(col as f64), y, z]);
        }
    }

    log::trace!(
        "built {} points from a {} range image",
        cloud.len(),
        range_image.size()
    );

    cloud
}

impl RangeCalibration {
    /// Build the point cloud of a range image with this calibration.
    ///
    /// Equivalent to [`build_point_cloud`].
    pub fn build_point_cloud(&self, range_image: &RangeImage) -> PointCloud {
        build_point_cloud_with(range_image, self, ZeroFilter::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rangecloud_image::ImageError;

    #[test]
    fn test_build_point_cloud_2x2() -> Result<(), ImageError> {
        let image = RangeImage::new([2, 2].into(), vec![0, 100, 200, 0])?;
        let unit = AxisCalibration::identity();
        let cloud = build_point_cloud(&image, &unit, &unit, &AxisCalibration::new(0.0, 0.1));

        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.points()[0][0], 1.0);
        assert_eq!(cloud.points()[0][1], 0.0);
        assert_relative_eq!(cloud.points()[0][2], 10.0);
        assert_eq!(cloud.points()[1][0], 0.0);
        assert_eq!(cloud.points()[1][1], 1.0);
        assert_relative_eq!(cloud.points()[1][2], 20.0);
        Ok(())
    }

    #[test]
    fn test_all_zero_image() -> Result<(), ImageError> {
        let image = RangeImage::from_size_val([7, 5].into(), 0)?;
        let calib = RangeCalibration {
            z: AxisCalibration::new(12.0, 3.0),
            ..Default::default()
        };
        assert!(calib.build_point_cloud(&image).is_empty());
        assert!(build_point_cloud_with(&image, &calib, ZeroFilter::RawOnly).is_empty());
        Ok(())
    }

    #[test]
    fn test_world_zero_filter() -> Result<(), ImageError> {
        let image = RangeImage::new([1, 1].into(), vec![500])?;
        let calib = RangeCalibration {
            z: AxisCalibration::new(-50.0, 0.1),
            ..Default::default()
        };

        let strict = build_point_cloud_with(&image, &calib, ZeroFilter::RawAndWorld);
        assert!(strict.is_empty());

        let raw_only = build_point_cloud_with(&image, &calib, ZeroFilter::RawOnly);
        assert_eq!(raw_only.points(), &[[0.0, 0.0, 0.0]]);
        Ok(())
    }

    #[test]
    fn test_raw_zero_dropped_despite_offset() -> Result<(), ImageError> {
        // a zero sample would map to z = 5.0, it must still be dropped
        let image = RangeImage::new([3, 1].into(), vec![0, 1, 0])?;
        let calib = RangeCalibration {
            z: AxisCalibration::new(5.0, 1.0),
            ..Default::default()
        };
        let cloud = build_point_cloud_with(&image, &calib, ZeroFilter::RawOnly);
        assert_eq!(cloud.points(), &[[1.0, 0.0, 6.0]]);
        Ok(())
    }

    #[test]
    fn test_flipped_axes() -> Result<(), ImageError> {
        let image = RangeImage::new([2, 2].into(), vec![10, 10, 10, 10])?;
        let calib = RangeCalibration {
            x: AxisCalibration::new(1.0, -0.5),
            y: AxisCalibration::new(-3.0, -2.0),
            z: AxisCalibration::new(0.0, -1.0),
        };
        let cloud = calib.build_point_cloud(&image);
        assert_eq!(
            cloud.points(),
            &[
                [1.0, -3.0, -10.0],
                [0.5, -3.0, -10.0],
                [1.0, -5.0, -10.0],
                [0.5, -5.0, -10.0],
            ]
        );
        Ok(())
    }
}
