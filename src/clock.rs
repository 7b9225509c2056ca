//! Wall-clock timing utilities for benchmarks.
//!
//! Time is taken from [`Instant`], which is monotonic and has sub-microsecond
//! resolution on every supported platform. Elapsed values are reported as
//! `f64` seconds because that is what the benchmark lines and charts print.

use std::fmt::Write;
use std::time::{Duration, Instant};

/// Measures the time elapsed since it was created (or last restarted).
///
/// # Examples
///
/// ```
/// # use benchlog::Timer;
/// let timer = Timer::new();
/// std::thread::sleep(std::time::Duration::from_millis(1));
/// assert!(timer.elapsed() >= 0.001);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds elapsed since the start.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    pub fn elapsed_duration(&self) -> Duration {
        self.start.elapsed()
    }

    /// The instant the timer started at.
    pub fn start(&self) -> Instant {
        self.start
    }

    /// Starts measuring again from now.
    pub fn restart(&mut self) {
        self.start = Instant::now();
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats `secs` as a days/hours/minutes/seconds breakdown.
///
/// Leading zero units are omitted, seconds are printed with `precision`
/// fractional digits.
///
/// ```
/// # use benchlog::clock::pretty_time;
/// assert_eq!(pretty_time(75.5, 1), "1m 15.5s");
/// assert_eq!(pretty_time(90061.0, 0), "1d 1h 1m 1s");
/// assert_eq!(pretty_time(3605.0, 0), "1h 0m 5s");
/// ```
pub fn pretty_time(secs: f64, precision: usize) -> String {
    let total_minutes = (secs / 60.0).floor().max(0.0) as u64;
    let seconds = secs - (total_minutes as f64) * 60.0;
    let total_hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    let days = total_hours / 24;
    let hours = total_hours % 24;

    let mut out = String::new();
    if days > 0 {
        let _ = write!(out, "{}d ", days);
    }
    if total_hours > 0 {
        let _ = write!(out, "{}h ", hours);
    }
    if total_minutes > 0 {
        let _ = write!(out, "{}m ", minutes);
    }
    let _ = write!(out, "{:.*}s", precision, seconds);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_time_seconds_only() {
        assert_eq!(pretty_time(5.25, 2), "5.25s");
    }

    #[test]
    fn test_pretty_time_breakdown() {
        assert_eq!(pretty_time(60.0, 0), "1m 0s");
        assert_eq!(pretty_time(7322.0, 0), "2h 2m 2s");
        assert_eq!(pretty_time(2.0 * 86400.0 + 30.0, 0), "2d 0h 0m 30s");
    }

    #[test]
    fn test_timer_restart() {
        let mut timer = Timer::new();
        std::thread::sleep(Duration::from_millis(5));
        let before = timer.elapsed();
        timer.restart();
        assert!(timer.elapsed() < before);
    }
}
