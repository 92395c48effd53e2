use std::time::{Duration, Instant};

/// Weight kept by the smoothed frame period on every new frame.
const SMOOTHING: f64 = 0.95;

/// Measures the timing of a frame processing run.
///
/// The timer keeps the total run time and an exponentially smoothed frame period, from
/// which the frame rate reported in [`ProcessStats`](crate::stream::ProcessStats) is
/// derived.
///
/// # Examples
///
/// ```
/// use rangecloud_io::frame_timer::FrameTimer;
///
/// let mut timer = FrameTimer::start();
///
/// for _ in 0..100 {
///    timer.lap();
/// }
///
/// assert_eq!(timer.frames(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct FrameTimer {
    start: Instant,
    last_lap: Instant,
    frames: usize,
    period: Option<f64>,
}

impl FrameTimer {
    /// Starts timing a run.
    pub fn start() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_lap: now,
            frames: 0,
            period: None,
        }
    }

    /// Marks the end of a frame and returns the time spent on it.
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_lap);
        self.last_lap = now;
        self.frames += 1;

        let secs = frame_time.as_secs_f64();
        self.period = Some(match self.period {
            Some(period) => period * SMOOTHING + secs * (1.0 - SMOOTHING),
            None => secs,
        });

        frame_time
    }

    /// Number of frames timed so far.
    #[inline]
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Time since the run started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Smoothed frame rate, or `0.0` until a frame of measurable length was timed.
    pub fn fps(&self) -> f32 {
        match self.period {
            Some(period) if period > 0.0 => (1.0 / period) as f32,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FrameTimer;
    use std::time::Duration;

    #[test]
    fn frame_timer_without_frames() {
        let timer = FrameTimer::start();
        assert_eq!(timer.frames(), 0);
        assert_eq!(timer.fps(), 0.0);
    }

    #[test]
    fn frame_timer_laps() {
        let mut timer = FrameTimer::start();

        std::thread::sleep(Duration::from_millis(5));
        let first = timer.lap();
        timer.lap();
        timer.lap();

        assert!(first >= Duration::from_millis(5));
        assert_eq!(timer.frames(), 3);
        assert!(timer.elapsed() >= first);
        assert!(timer.fps() > 0.0);
        assert!(timer.fps().is_finite());
    }
}
