use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rangecloud_3d::{build_point_cloud_with, PointCloud, RangeCalibration, ZeroFilter};
use rangecloud_image::RangeImage;

use crate::error::IoError;
use crate::frame_timer::FrameTimer;
use crate::png::{has_png_extension, read_image_png_mono16};

/// A range image acquired from a source together with its calibration.
#[derive(Debug, Clone)]
pub struct RangeFrame {
    /// Position of the frame in the source, starting at zero.
    pub index: usize,
    /// The raw range image.
    pub image: RangeImage,
    /// The calibration of the three axes of the image.
    pub calibration: RangeCalibration,
}

/// A source of range frames, such as a profiler or a recorded sequence.
pub trait RangeFrameSource {
    /// Acquire the next frame, blocking until it is available.
    ///
    /// Returns `Ok(None)` once the source is exhausted.
    fn next_frame(&mut self) -> Result<Option<RangeFrame>, IoError>;
}

/// Replays a directory of 16-bit PNG range images in file name order.
///
/// Every frame shares the same calibration.
pub struct PngSequenceSource {
    files: Vec<PathBuf>,
    calibration: RangeCalibration,
    next: usize,
}

impl PngSequenceSource {
    /// Creates a new source over the `.png` files of a directory.
    ///
    /// # Arguments
    ///
    /// * `dir` - The directory holding the range images.
    /// * `calibration` - The calibration attached to every frame.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be listed or the calibration holds non finite values.
    pub fn new(dir: impl AsRef<Path>, calibration: RangeCalibration) -> Result<Self, IoError> {
        calibration.validate()?;

        let dir = dir.as_ref();
        if !dir.exists() {
            return Err(IoError::FileDoesNotExist(dir.to_path_buf()));
        }

        let mut files = std::fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        files.retain(|path| path.is_file() && has_png_extension(path));
        files.sort();

        log::debug!("found {} range images in {}", files.len(), dir.display());

        Ok(Self {
            files,
            calibration,
            next: 0,
        })
    }

    /// Number of frames in the sequence.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the sequence has no frames.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl RangeFrameSource for PngSequenceSource {
    fn next_frame(&mut self) -> Result<Option<RangeFrame>, IoError> {
        let Some(path) = self.files.get(self.next) else {
            return Ok(None);
        };

        let image = read_image_png_mono16(path)?;
        let frame = RangeFrame {
            index: self.next,
            image,
            calibration: self.calibration,
        };
        self.next += 1;

        Ok(Some(frame))
    }
}

/// Summary of a frame processing run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessStats {
    /// Number of frames turned into point clouds.
    pub frames: usize,
    /// Total number of points over all frames.
    pub points: usize,
    /// Wall time of the run, acquisition included.
    pub elapsed: Duration,
    /// Smoothed frame rate at the end of the run.
    pub fps: f32,
}

/// Acquire frames, build their point clouds and hand them to a consumer.
///
/// The loop runs until the source is exhausted or `cancel` is set. The flag is only
/// checked between frames: a frame whose acquisition has started is always built and
/// consumed.
///
/// # Arguments
///
/// * `source` - The frame source.
/// * `filter` - Which samples to drop when building the point clouds.
/// * `cancel` - Stops the loop at the next frame boundary when set.
/// * `on_cloud` - Consumer of each frame and its point cloud. Its error type only needs
///   to absorb [`IoError`], so consumers can report their own failures.
///
/// # Returns
///
/// The number of frames and points processed, the run time and the final frame rate.
pub fn process_frames<S, F, E>(
    source: &mut S,
    filter: ZeroFilter,
    cancel: &AtomicBool,
    mut on_cloud: F,
) -> Result<ProcessStats, E>
where
    S: RangeFrameSource + ?Sized,
    F: FnMut(&RangeFrame, &PointCloud) -> Result<(), E>,
    E: From<IoError>,
{
    let mut timer = FrameTimer::start();
    let mut points = 0;

    while !cancel.load(Ordering::Relaxed) {
        let Some(frame) = source.next_frame()? else {
            break;
        };

        let cloud = build_point_cloud_with(&frame.image, &frame.calibration, filter);
        log::debug!("frame #{}: {} points", frame.index, cloud.len());

        on_cloud(&frame, &cloud)?;

        let frame_time = timer.lap();
        log::trace!("frame #{} took {:?}", frame.index, frame_time);
        points += cloud.len();
    }

    let stats = ProcessStats {
        frames: timer.frames(),
        points,
        elapsed: timer.elapsed(),
        fps: timer.fps(),
    };
    log::info!(
        "processed {} frames ({} points) in {:.2?} at {:.1} fps",
        stats.frames,
        stats.points,
        stats.elapsed,
        stats.fps
    );

    Ok(stats)
}
