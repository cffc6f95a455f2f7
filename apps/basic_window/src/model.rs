// GlTutor
// copyright gl_tutor developers 2024～2025

use std::f32::consts::TAU;

/// seconds for the clear colour to go round once
pub const COLOR_CYCLE_SECS: f32 = 12.0;

pub struct BasicWindowModel {
    elapsed: f32,
    seen_fps_updates: u64,
}

impl BasicWindowModel {
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            seen_fps_updates: 0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt) % COLOR_CYCLE_SECS;
    }

    /// Three phase shifted waves, kept dark enough to read log text over
    pub fn clear_color(&self) -> [f32; 3] {
        let phase = self.elapsed / COLOR_CYCLE_SECS * TAU;
        let wave = |offset: f32| 0.1 + 0.25 * (0.5 + 0.5 * (phase + offset).sin());
        [wave(0.0), wave(TAU / 3.0), wave(2.0 * TAU / 3.0)]
    }

    /// True when the timer published a new FPS value since the last call
    pub fn take_fps_update(&mut self, fps_updates: u64) -> bool {
        if fps_updates != self.seen_fps_updates {
            self.seen_fps_updates = fps_updates;
            true
        } else {
            false
        }
    }
}
