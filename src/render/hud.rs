// GlTutor
// copyright gl_tutor developers 2024～2025

//! HUD text printing.
//!
//! ```ignore
//! hud.print_builder()
//!     .from_right()
//!     .from_top()
//!     .with_offset(10.0, 10.0)
//!     .print(ctx, font, format_args!("FPS: {}", ctx.fps()));
//! ```
//!
//! The anchor corner is resolved against the window size at print time, so text stays
//! glued to its corner while the window is resized.

use super::font::BitmapFont;
use super::shader::{ShaderManager, ShaderStage};
use super::shader_source::{FRAGMENT_SRC_HUD, VERTEX_SRC_HUD};
use crate::context::Context;
use crate::error::AppError;
use glam::{Mat4, Vec4};
use glow::HasContext;
use std::fmt;

const HUD_PROGRAM: &str = "hud";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAnchor {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAnchor {
    #[default]
    Bottom,
    Top,
}

/// Bottom-left corner of a text block of `text` size placed `offset` away from the
/// anchored window corner, in GL window coordinates (origin bottom-left)
pub fn resolve_origin(
    horizontal: HorizontalAnchor,
    vertical: VerticalAnchor,
    offset: (f32, f32),
    text: (f32, f32),
    window: (f32, f32),
) -> (f32, f32) {
    let x = match horizontal {
        HorizontalAnchor::Left => offset.0,
        HorizontalAnchor::Right => window.0 - offset.0 - text.0,
    };
    let y = match vertical {
        VerticalAnchor::Bottom => offset.1,
        VerticalAnchor::Top => window.1 - offset.1 - text.1,
    };
    (x, y)
}

/// Shader and streaming buffer shared by all prints of one scene
pub struct HudBase {
    shaders: ShaderManager,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
}

impl HudBase {
    /// Also makes sure the default font is loaded
    pub fn new(ctx: &mut Context) -> Result<Self, AppError> {
        ctx.ensure_default_font()?;
        let gl = ctx.gl();
        let mut shaders = ShaderManager::new();
        shaders.load_shader_from_source(gl, "hud_vs", ShaderStage::Vertex, VERTEX_SRC_HUD)?;
        shaders.load_shader_from_source(gl, "hud_fs", ShaderStage::Fragment, FRAGMENT_SRC_HUD)?;
        shaders.create_program(gl, HUD_PROGRAM, &["hud_vs", "hud_fs"])?;

        unsafe {
            let vao = gl.create_vertex_array().map_err(AppError::Context)?;
            let vbo = gl.create_buffer().map_err(AppError::Context)?;
            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            // position xy, tex coord uv
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, glow::FLOAT, false, 16, 0);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 2, glow::FLOAT, false, 16, 8);
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            Ok(Self { shaders, vao, vbo })
        }
    }

    pub fn print_builder(&mut self) -> PrintBuilder<'_> {
        PrintBuilder {
            hud: self,
            horizontal: HorizontalAnchor::default(),
            vertical: VerticalAnchor::default(),
            offset: (0.0, 0.0),
            color: Vec4::ONE,
        }
    }

    fn draw(&mut self, gl: &glow::Context, font: &BitmapFont, ortho: &Mat4, color: Vec4, vertices: &[[f32; 4]]) {
        if vertices.is_empty() {
            return;
        }
        let Ok(program) = self.shaders.program_mut(HUD_PROGRAM) else {
            return;
        };
        unsafe {
            let depth_test = gl.is_enabled(glow::DEPTH_TEST);
            gl.disable(glow::DEPTH_TEST);
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);

            program.use_program(gl);
            program.set_mat4(gl, "u_ortho", ortho);
            program.set_vec4(gl, "u_color", color);
            program.set_i32(gl, "u_atlas", 0);
            // a scene sampler left on unit 0 would override the atlas filtering
            gl.bind_sampler(0, None);
            font.bind(gl, 0);

            gl.bind_vertex_array(Some(self.vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::STREAM_DRAW,
            );
            gl.draw_arrays(glow::TRIANGLES, 0, vertices.len() as i32);
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            gl.disable(glow::BLEND);
            if depth_test {
                gl.enable(glow::DEPTH_TEST);
            }
        }
    }

    pub fn release(&mut self, gl: &glow::Context) {
        self.shaders.release_all(gl);
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
        }
    }
}

pub struct PrintBuilder<'a> {
    hud: &'a mut HudBase,
    horizontal: HorizontalAnchor,
    vertical: VerticalAnchor,
    offset: (f32, f32),
    color: Vec4,
}

impl PrintBuilder<'_> {
    pub fn from_left(mut self) -> Self {
        self.horizontal = HorizontalAnchor::Left;
        self
    }

    pub fn from_right(mut self) -> Self {
        self.horizontal = HorizontalAnchor::Right;
        self
    }

    pub fn from_bottom(mut self) -> Self {
        self.vertical = VerticalAnchor::Bottom;
        self
    }

    pub fn from_top(mut self) -> Self {
        self.vertical = VerticalAnchor::Top;
        self
    }

    /// Distance in pixels from the anchored corner
    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = (x, y);
        self
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    pub fn print(self, ctx: &Context, font: &BitmapFont, args: fmt::Arguments) {
        let text = fmt::format(args);
        let glyphs = font.glyphs();
        let (x, y) = resolve_origin(
            self.horizontal,
            self.vertical,
            self.offset,
            (glyphs.text_width(&text), glyphs.text_height(&text)),
            (ctx.width() as f32, ctx.height() as f32),
        );
        let vertices = glyphs.layout(&text, x, y);
        self.hud
            .draw(ctx.gl(), font, &ctx.ortho_matrix(), self.color, &vertices);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: (f32, f32) = (800.0, 600.0);
    const TEXT: (f32, f32) = (120.0, 24.0);

    #[test]
    fn test_bottom_left() {
        let p = resolve_origin(HorizontalAnchor::Left, VerticalAnchor::Bottom, (10.0, 5.0), TEXT, WINDOW);
        assert_eq!(p, (10.0, 5.0));
    }

    #[test]
    fn test_top_right() {
        let p = resolve_origin(HorizontalAnchor::Right, VerticalAnchor::Top, (10.0, 5.0), TEXT, WINDOW);
        assert_eq!(p, (800.0 - 10.0 - 120.0, 600.0 - 5.0 - 24.0));
    }

    #[test]
    fn test_mixed_corners() {
        let p = resolve_origin(HorizontalAnchor::Left, VerticalAnchor::Top, (0.0, 0.0), TEXT, WINDOW);
        assert_eq!(p, (0.0, 576.0));
        let p = resolve_origin(HorizontalAnchor::Right, VerticalAnchor::Bottom, (0.0, 0.0), TEXT, WINDOW);
        assert_eq!(p, (680.0, 0.0));
    }

    #[test]
    fn test_follows_window_size() {
        let small = resolve_origin(HorizontalAnchor::Right, VerticalAnchor::Top, (10.0, 10.0), TEXT, (400.0, 300.0));
        let large = resolve_origin(HorizontalAnchor::Right, VerticalAnchor::Top, (10.0, 10.0), TEXT, (1920.0, 1080.0));
        assert_eq!(large.0 - small.0, 1520.0);
        assert_eq!(large.1 - small.1, 780.0);
    }
}
