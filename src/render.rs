// GlTutor
// copyright gl_tutor developers 2024～2025

//! Render module: thin keyed wrappers around OpenGL objects created through glow.
//!
//! cache: string keyed store shared by all managers.
//! shader: shader compilation and programs with uniform setters.
//! shader_source: GLSL sources embedded in the library.
//! texture / sampler: 2D textures from image files and sampler objects.
//! primitives: CPU side generators for a few static meshes.
//! mesh: uploading primitive data into VAO/VBO pairs and drawing them.
//! font: ASCII glyph atlas rasterised by fontdue.
//! hud: builder style text printing anchored to a window corner.
//! projection: perspective and orthographic matrices derived from the window size.
//!
//! Every manager follows the same shape: load by key or path -> handle,
//! bind or use a handle, release everything.

pub mod cache;
pub mod font;
pub mod hud;
pub mod mesh;
pub mod primitives;
pub mod projection;
pub mod sampler;
pub mod shader;
pub mod shader_source;
pub mod texture;
