use argh::FromArgs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rangecloud::io::calibration::{read_calibration, write_calibration};
use rangecloud::io::stream::{process_frames, PngSequenceSource};
use rangecloud::k3d::{RangeCalibration, ZeroFilter};

#[derive(FromArgs)]
/// Replay a directory of 16-bit range images and log their point clouds to Rerun
struct Args {
    /// directory holding the range images (.png, mono16)
    #[argh(option)]
    frames_dir: PathBuf,

    /// path to the calibration file (.json); identity when omitted
    #[argh(option)]
    calibration: Option<PathBuf>,

    /// keep points whose world depth is exactly zero
    #[argh(switch)]
    raw_only: bool,

    /// write the calibration in use to this path
    #[argh(option)]
    output_calibration: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let calibration = match &args.calibration {
        Some(path) => read_calibration(path)?,
        None => {
            log::warn!("no calibration given, using raw pixel and sample units");
            RangeCalibration::default()
        }
    };

    if let Some(path) = &args.output_calibration {
        write_calibration(path, &calibration)?;
    }

    let filter = if args.raw_only {
        ZeroFilter::RawOnly
    } else {
        ZeroFilter::RawAndWorld
    };

    let mut source = PngSequenceSource::new(&args.frames_dir, calibration)?;
    println!("Replaying #{} frames", source.len());

    // create a Rerun recording stream
    let rec = rerun::RecordingStreamBuilder::new("Range Viewer").spawn()?;

    // stop at the next frame boundary on ctrl-c
    let cancel = Arc::new(AtomicBool::new(false));
    ctrlc::set_handler({
        let cancel = cancel.clone();
        move || {
            println!("Received Ctrl-C signal. Stopping after the current frame.");
            cancel.store(true, Ordering::Relaxed);
        }
    })?;

    let stats = process_frames(
        &mut source,
        filter,
        &cancel,
        |frame, cloud| -> Result<(), Box<dyn std::error::Error>> {
            rec.set_time_sequence("frame", frame.index as i64);

            let points = cloud
                .iter()
                .map(|p| rerun::Position3D::new(p[0] as f32, p[1] as f32, p[2] as f32))
                .collect::<Vec<_>>();

            // the X/Z profile of the scan
            let profile = cloud
                .iter()
                .map(|p| rerun::Position2D::new(p[0] as f32, p[2] as f32))
                .collect::<Vec<_>>();

            rec.log("pointcloud", &rerun::Points3D::new(points))?;
            rec.log(
                "profile",
                &rerun::Points2D::new(profile).with_colors([rerun::Color::from_rgb(255, 0, 0)]),
            )?;

            Ok(())
        },
    )?;

    println!(
        "Processed #{} frames, #{} points in {:.2?}, {:.1} fps",
        stats.frames, stats.points, stats.elapsed, stats.fps
    );

    Ok(())
}
