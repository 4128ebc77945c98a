//! Time management utilities
//!
//! Gameplay runs on a fixed step so level timers and spawn cadence are
//! reproducible; wall-clock measurement lives in [`Stopwatch`].

use std::time::{Duration, Instant};

/// Fixed-step frame clock driving the gameplay update loop
#[derive(Debug, Clone)]
pub struct FrameClock {
    step: f32,
    total_time: f32,
    frame_count: u64,
}

impl FrameClock {
    /// Create a clock ticking `hz` times per simulated second
    pub fn with_rate(hz: u32) -> Self {
        Self {
            step: 1.0 / hz.max(1) as f32,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance one frame and return its delta time
    pub fn tick(&mut self) -> f32 {
        self.total_time += self.step;
        self.frame_count += 1;
        self.step
    }

    /// Get the time step in seconds
    pub fn delta_time(&self) -> f32 {
        self.step
    }

    /// Get the total simulated time
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::with_rate(60)
    }
}

/// Simple stopwatch for measuring elapsed time
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a new stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start the stopwatch
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed += start.elapsed();
            self.start_time = None;
        }
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        let current_elapsed = self.start_time.map_or(Duration::ZERO, |start| start.elapsed());
        self.elapsed + current_elapsed
    }

    /// Get the elapsed time in milliseconds
    pub fn elapsed_millis(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1000.0
    }

    /// Check if the stopwatch is currently running
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_frame_clock_accumulates() {
        let mut clock = FrameClock::with_rate(60);
        for _ in 0..60 {
            clock.tick();
        }
        assert_eq!(clock.frame_count(), 60);
        assert_relative_eq!(clock.total_time(), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_zero_rate_is_clamped() {
        let clock = FrameClock::with_rate(0);
        assert_relative_eq!(clock.delta_time(), 1.0);
    }

    #[test]
    fn test_stopwatch_running_state() {
        let mut watch = Stopwatch::start_new();
        assert!(watch.is_running());
        watch.stop();
        assert!(!watch.is_running());
    }
}
