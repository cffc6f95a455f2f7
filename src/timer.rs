// GlTutor
// copyright gl_tutor developers 2024～2025

//! Frame timing: delta time between two frames and a frames-per-second counter.
//!
//! The FPS value is sampled over a one second window: frames are counted and the count
//! is published once more than a second of wall-clock time has passed since the last
//! publication, no matter how many frames that took.

use std::time::{Duration, Instant};

const FPS_WINDOW: Duration = Duration::from_secs(1);

pub struct FrameTimer {
    last_frame: Instant,
    last_fps_sample: Instant,
    delta: Duration,
    frames_in_window: u32,
    fps: u32,
    fps_updates: u64,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            last_frame: now,
            last_fps_sample: now,
            delta: Duration::ZERO,
            frames_in_window: 0,
            fps: 0,
            fps_updates: 0,
        }
    }

    /// Restarts timing, called right before the first frame so that scene
    /// initialisation time does not show up as the first delta
    pub fn reset(&mut self, now: Instant) {
        *self = Self::starting_at(now);
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        self.delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frames_in_window += 1;

        if now.saturating_duration_since(self.last_fps_sample) > FPS_WINDOW {
            self.last_fps_sample = now;
            self.fps = self.frames_in_window;
            self.frames_in_window = 0;
            self.fps_updates += 1;
        }
    }

    pub fn delta(&self) -> Duration {
        self.delta
    }

    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// How many times the FPS value has been published
    pub fn fps_updates(&self) -> u64 {
        self.fps_updates
    }

    /// speed optimised float: scales a per-second value by the last frame delta
    pub fn sof(&self, value: f32) -> f32 {
        value * self.delta_secs()
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_and_sof() {
        let t0 = Instant::now();
        let mut timer = FrameTimer::starting_at(t0);
        timer.tick_at(t0 + Duration::from_millis(20));
        assert_eq!(timer.delta(), Duration::from_millis(20));
        assert!((timer.sof(10.0) - 0.2).abs() < 1e-6);
        timer.tick_at(t0 + Duration::from_millis(30));
        assert_eq!(timer.delta(), Duration::from_millis(10));
    }

    #[test]
    fn test_fps_updates_once_per_second_not_per_frame() {
        let t0 = Instant::now();
        let mut timer = FrameTimer::starting_at(t0);
        // 60 frames just under one second do not publish yet
        for i in 1..=60 {
            timer.tick_at(t0 + Duration::from_micros(16_666 * i));
        }
        assert_eq!(timer.fps_updates(), 0);
        assert_eq!(timer.fps(), 0);

        // the next frame crosses the window
        timer.tick_at(t0 + Duration::from_millis(1010));
        assert_eq!(timer.fps_updates(), 1);
        assert_eq!(timer.fps(), 61);

        // many frames inside the next second leave the value alone
        for i in 1..=100 {
            timer.tick_at(t0 + Duration::from_millis(1010 + i * 9));
        }
        assert_eq!(timer.fps_updates(), 1);
        assert_eq!(timer.fps(), 61);
        timer.tick_at(t0 + Duration::from_millis(2020));
        assert_eq!(timer.fps_updates(), 2);
        assert_eq!(timer.fps(), 101);
    }

    #[test]
    fn test_long_stall_publishes_once() {
        let t0 = Instant::now();
        let mut timer = FrameTimer::starting_at(t0);
        timer.tick_at(t0 + Duration::from_secs(5));
        assert_eq!(timer.fps_updates(), 1);
        assert_eq!(timer.fps(), 1);
        assert_eq!(timer.delta(), Duration::from_secs(5));
    }

    #[test]
    fn test_reset() {
        let t0 = Instant::now();
        let mut timer = FrameTimer::starting_at(t0);
        timer.tick_at(t0 + Duration::from_secs(2));
        timer.reset(t0 + Duration::from_secs(3));
        assert_eq!(timer.fps(), 0);
        assert_eq!(timer.delta(), Duration::ZERO);
        timer.tick_at(t0 + Duration::from_millis(3016));
        assert_eq!(timer.delta(), Duration::from_millis(16));
    }
}
