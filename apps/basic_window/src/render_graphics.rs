// GlTutor
// copyright gl_tutor developers 2024～2025

use crate::model::BasicWindowModel;
use gl_tutor::{context::Context, error::AppError, event::Key, scene::Scene};
use glow::HasContext;
use log::info;

pub struct BasicWindowScene {
    model: BasicWindowModel,
}

impl BasicWindowScene {
    pub fn new() -> Self {
        Self {
            model: BasicWindowModel::new(),
        }
    }
}

impl Scene for BasicWindowScene {
    fn initialize(&mut self, ctx: &mut Context) -> Result<(), AppError> {
        info!(
            "window ready {}x{}, vsync {}",
            ctx.width(),
            ctx.height(),
            ctx.is_vsync_enabled()
        );
        info!("ESC closes the window, F3 toggles vsync");
        Ok(())
    }

    fn render(&mut self, ctx: &mut Context) {
        let [r, g, b] = self.model.clear_color();
        let gl = ctx.gl();
        unsafe {
            gl.clear_color(r, g, b, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn update(&mut self, ctx: &mut Context) {
        if ctx.key_pressed_once(Key::Escape) {
            ctx.close_window(false);
        }
        if ctx.key_pressed_once(Key::F3) {
            let vsync = !ctx.is_vsync_enabled();
            ctx.set_vsync(vsync);
        }
        self.model.advance(ctx.timer.delta_secs());
        if self.model.take_fps_update(ctx.timer.fps_updates()) {
            info!("FPS: {}", ctx.fps());
        }
    }

    fn release(&mut self, _ctx: &mut Context) {}

    fn on_window_resized(&mut self, _ctx: &mut Context, width: u32, height: u32) {
        info!("window resized to {}x{}", width, height);
    }
}
