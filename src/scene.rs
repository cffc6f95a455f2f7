// GlTutor
// copyright gl_tutor developers 2024～2025

//! A Scene is the tutorial specific part of a program.
//!
//! The window drives it in a fixed order:
//! initialize once, then render and update every frame, release once at the end.
//! Resize and scroll handlers are called between render and update, after the
//! OS events of the frame were pumped.

use crate::context::Context;
use crate::error::AppError;

pub trait Scene {
    /// Create GL resources. An error closes the window with the error flag set.
    fn initialize(&mut self, ctx: &mut Context) -> Result<(), AppError>;

    fn render(&mut self, ctx: &mut Context);

    fn update(&mut self, ctx: &mut Context);

    /// Delete GL resources; the context is still current
    fn release(&mut self, ctx: &mut Context);

    /// Projection matrices are already recomputed for the new size
    fn on_window_resized(&mut self, _ctx: &mut Context, _width: u32, _height: u32) {}

    fn on_mouse_wheel_scroll(&mut self, _ctx: &mut Context, _dx: f64, _dy: f64) {}
}
