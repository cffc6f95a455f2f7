// GlTutor
// copyright gl_tutor developers 2024～2025

use super::primitives::Vertex;
use crate::error::AppError;
use glow::HasContext;

/// Triangle list uploaded once into its own VAO/VBO pair
pub struct StaticMesh {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    vertex_count: i32,
}

impl StaticMesh {
    pub fn new(gl: &glow::Context, vertices: &[Vertex]) -> Result<Self, AppError> {
        let stride = std::mem::size_of::<Vertex>() as i32;
        unsafe {
            let vao = gl.create_vertex_array().map_err(AppError::Context)?;
            let vbo = gl.create_buffer().map_err(AppError::Context)?;
            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::STATIC_DRAW,
            );

            // position, normal, tex_coord
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, 12);
            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(2, 2, glow::FLOAT, false, stride, 24);

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(Self {
                vao,
                vbo,
                vertex_count: vertices.len() as i32,
            })
        }
    }

    pub fn render(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_arrays(glow::TRIANGLES, 0, self.vertex_count);
            gl.bind_vertex_array(None);
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count as usize
    }

    pub fn release(self, gl: &glow::Context) {
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
        }
    }
}
