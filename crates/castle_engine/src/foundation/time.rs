//! Frame timing

use std::time::{Duration, Instant};

/// Frame counter and clock for the simulation loop
///
/// Scripted drivers feed it with [`FrameTimer::advance`]; interactive ones
/// call [`FrameTimer::tick`] to sample the wall clock. Gaps such as a
/// suspended window are reported as-is: clamping is the frame loop's job.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    last_sample: Option<Instant>,
    last_dt: f32,
    elapsed: f64,
    frames: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    /// Timer at frame zero
    pub fn new() -> Self {
        Self { last_sample: None, last_dt: 0.0, elapsed: 0.0, frames: 0 }
    }

    /// Advance by the wall-clock time since the previous tick.
    ///
    /// The first tick reports zero.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = self
            .last_sample
            .replace(now)
            .map_or(0.0, |previous| now.duration_since(previous).as_secs_f32());
        self.advance(dt)
    }

    /// Advance by `dt` seconds; negative steps count as zero
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.last_dt = dt.max(0.0);
        self.elapsed += f64::from(self.last_dt);
        self.frames += 1;
        self.last_dt
    }

    /// Step of the most recent frame
    pub fn delta_time(&self) -> f32 {
        self.last_dt
    }

    /// Simulated seconds so far
    #[allow(clippy::cast_possible_truncation)]
    pub fn total_time(&self) -> f32 {
        self.elapsed as f32
    }

    /// Frames advanced so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

/// Accumulates time spent inside timed sections
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    total: Duration,
    laps: u32,
}

impl Stopwatch {
    /// Stopwatch with nothing recorded
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `work` and add its duration as one lap
    pub fn time<R>(&mut self, work: impl FnOnce() -> R) -> R {
        let start = Instant::now();
        let result = work();
        self.total += start.elapsed();
        self.laps += 1;
        result
    }

    /// Laps recorded
    pub fn laps(&self) -> u32 {
        self.laps
    }

    /// Total time across laps
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Mean lap in milliseconds, zero before the first lap
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_lap_millis(&self) -> f32 {
        if self.laps == 0 {
            0.0
        } else {
            self.total.as_secs_f32() * 1000.0 / self.laps as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_advance_accumulates() {
        let mut timer = FrameTimer::new();
        for _ in 0..4 {
            timer.advance(0.25);
        }
        assert_eq!(timer.frame_count(), 4);
        assert_relative_eq!(timer.total_time(), 1.0);
    }

    #[test]
    fn test_negative_step_is_ignored() {
        let mut timer = FrameTimer::new();
        assert_relative_eq!(timer.advance(-1.0), 0.0);
        assert_relative_eq!(timer.total_time(), 0.0);
        assert_eq!(timer.frame_count(), 1);
    }

    #[test]
    fn test_first_tick_is_zero() {
        let mut timer = FrameTimer::new();
        assert_relative_eq!(timer.tick(), 0.0);
        assert!(timer.tick() >= 0.0);
    }

    #[test]
    fn test_stopwatch_counts_laps() {
        let mut stopwatch = Stopwatch::new();
        assert_relative_eq!(stopwatch.mean_lap_millis(), 0.0);
        let value = stopwatch.time(|| 21 * 2);
        assert_eq!(value, 42);
        stopwatch.time(|| ());
        assert_eq!(stopwatch.laps(), 2);
    }
}
