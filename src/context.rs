// GlTutor
// copyright gl_tutor developers 2024～2025

//! Context is what a scene sees of its window:
//! the GL function table, input, frame timing, projection matrices,
//! the close and vsync flags, and the font manager.
//! The window owns it and hands `&mut Context` to every scene callback.

use crate::{
    config::{AssetConfig, ProjectionConfig},
    error::AppError,
    event::{InputState, Key, MouseButton, WindowSignal},
    render::{
        font::{BitmapFont, FontManager, DEFAULT_FONT_KEY},
        projection::Projection,
    },
    timer::FrameTimer,
};
use glam::Mat4;
use log::{error, info};

/// Close request and error flag of a window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CloseState {
    should_close: bool,
    has_error: bool,
}

impl CloseState {
    /// The error flag is sticky: a later clean close does not clear it
    pub fn close(&mut self, error: bool) {
        self.should_close = true;
        self.has_error |= error;
    }

    pub fn should_close(&self) -> bool {
        self.should_close
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }
}

pub struct Context {
    gl: glow::Context,
    pub input: InputState,
    pub timer: FrameTimer,
    pub fonts: FontManager,
    projection: Projection,
    assets: AssetConfig,
    vsync: bool,
    vsync_dirty: bool,
    close: CloseState,
}

impl Context {
    pub fn new(
        gl: glow::Context,
        width: u32,
        height: u32,
        vsync: bool,
        projection: ProjectionConfig,
        assets: AssetConfig,
    ) -> Self {
        Self {
            gl,
            input: InputState::new(),
            timer: FrameTimer::new(),
            fonts: FontManager::new(),
            projection: Projection::new(projection, width, height),
            assets,
            vsync,
            vsync_dirty: false,
            close: CloseState::default(),
        }
    }

    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Ends the run loop at the start of the next iteration
    pub fn close_window(&mut self, error: bool) {
        if error {
            error!("window closing with error");
        }
        self.close.close(error);
    }

    pub fn should_close(&self) -> bool {
        self.close.should_close()
    }

    pub fn has_error(&self) -> bool {
        self.close.has_error()
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.input.key_pressed(key)
    }

    pub fn key_pressed_once(&mut self, key: Key) -> bool {
        self.input.key_pressed_once(key)
    }

    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.input.mouse_pressed(button)
    }

    pub fn cursor_delta(&self) -> (f64, f64) {
        self.input.cursor_delta()
    }

    /// Speed optimised float: scales a per-second value by the last frame time
    pub fn sof(&self, value: f32) -> f32 {
        self.timer.sof(value)
    }

    pub fn fps(&self) -> u32 {
        self.timer.fps()
    }

    pub fn set_vsync(&mut self, enable: bool) {
        if self.vsync != enable {
            info!("vsync {}", if enable { "on" } else { "off" });
            self.vsync = enable;
            self.vsync_dirty = true;
        }
    }

    pub fn is_vsync_enabled(&self) -> bool {
        self.vsync
    }

    /// Returns the pending vsync change once, for the window to apply
    pub(crate) fn take_vsync_change(&mut self) -> Option<bool> {
        if self.vsync_dirty {
            self.vsync_dirty = false;
            Some(self.vsync)
        } else {
            None
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.perspective()
    }

    pub fn ortho_matrix(&self) -> Mat4 {
        self.projection.ortho()
    }

    pub fn width(&self) -> u32 {
        self.projection.width()
    }

    pub fn height(&self) -> u32 {
        self.projection.height()
    }

    /// Recomputes matrices and the viewport; false for a minimised window
    pub(crate) fn resize(&mut self, width: u32, height: u32) -> bool {
        if !self.projection.recalculate(width, height) {
            return false;
        }
        unsafe {
            use glow::HasContext;
            self.gl.viewport(0, 0, width as i32, height as i32);
        }
        true
    }

    /// Feeds input signals; window level signals are left to the caller
    pub(crate) fn handle_signal(&mut self, signal: &WindowSignal) {
        self.input.handle(signal);
    }

    pub fn assets(&self) -> &AssetConfig {
        &self.assets
    }

    /// Loads the configured HUD font unless it is already there
    pub fn ensure_default_font(&mut self) -> Result<(), AppError> {
        self.fonts.ensure_default(&self.gl, &self.assets)?;
        Ok(())
    }

    pub fn default_font(&self) -> Option<&BitmapFont> {
        self.fonts.get(DEFAULT_FONT_KEY).ok()
    }

    pub(crate) fn release_fonts(&mut self) {
        self.fonts.release_all(&self.gl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_state_starts_open() {
        let state = CloseState::default();
        assert!(!state.should_close());
        assert!(!state.has_error());
    }

    #[test]
    fn test_clean_close() {
        let mut state = CloseState::default();
        state.close(false);
        assert!(state.should_close());
        assert!(!state.has_error());
    }

    #[test]
    fn test_error_survives_later_clean_close() {
        let mut state = CloseState::default();
        state.close(true);
        // e.g. the user closes the window after a failed initialization
        state.close(false);
        assert!(state.should_close());
        assert!(state.has_error());

        let mut state = CloseState::default();
        state.close(false);
        state.close(true);
        assert!(state.has_error());
    }
}
