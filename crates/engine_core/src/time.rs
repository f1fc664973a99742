//! Frame timing for the render loop.
//!
//! Orbital and spin angles are always derived from `elapsed_seconds` (absolute
//! wall-clock time since start), never integrated per frame, so body positions
//! cannot drift with frame rate. Delta time only scales camera movement.

use std::time::{Duration, Instant};

/// Tracks per-frame delta time and total elapsed time.
#[derive(Debug)]
pub struct Time {
    /// Time when the viewer started.
    start_time: Instant,
    /// Time of the last frame.
    last_frame: Instant,
    /// Duration of the last frame.
    delta: Duration,
    /// Total elapsed time since start.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_frame: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Update timing at the start of a new frame.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_frame;
        self.last_frame = now;
        self.elapsed = now - self.start_time;
        self.frame_count += 1;
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get total elapsed time in seconds. Drives orbit and spin angles.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (from the last frame's delta).
    pub fn fps(&self) -> f32 {
        if self.delta.as_secs_f32() > 0.0 {
            1.0 / self.delta.as_secs_f32()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_and_delta_advance() {
        let mut time = Time::new();
        assert_eq!(time.frame_count(), 0);
        std::thread::sleep(Duration::from_millis(5));
        time.update();
        assert_eq!(time.frame_count(), 1);
        assert!(time.delta_seconds() > 0.0);
        assert!(time.elapsed_seconds() >= time.delta_seconds());
    }

    #[test]
    fn elapsed_is_monotonic() {
        let mut time = Time::new();
        time.update();
        let first = time.elapsed_seconds();
        time.update();
        assert!(time.elapsed_seconds() >= first);
    }
}
