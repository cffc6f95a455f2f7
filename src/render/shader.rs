// GlTutor
// copyright gl_tutor developers 2024～2025

//! Shader objects and linked programs, both stored under string keys.
//!
//! ```ignore
//! shaders.load_shader_from_source(gl, "color_vs", ShaderStage::Vertex, COLOR_VERTEX)?;
//! shaders.load_shader_from_file(gl, "color_fs", "shaders/color.frag")?;
//! shaders.create_program(gl, "color", &["color_vs", "color_fs"])?;
//!
//! let program = shaders.program_mut("color")?;
//! program.use_program(gl);
//! program.set_mat4(gl, "u_mvp", &mvp);
//! ```

use super::cache::KeyedCache;
use crate::error::AppError;
use glam::{Mat4, Vec3, Vec4};
use glow::HasContext;
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
}

impl ShaderStage {
    /// Guesses the stage from the usual file extensions (.vert, .frag, .geom)
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "vert" | "vs" => Some(ShaderStage::Vertex),
            "frag" | "fs" => Some(ShaderStage::Fragment),
            "geom" | "gs" => Some(ShaderStage::Geometry),
            _ => None,
        }
    }

    fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
            ShaderStage::Geometry => glow::GEOMETRY_SHADER,
        }
    }
}

/// Prepends the framework GLSL version line unless the source carries its own
pub fn with_version_header(source: &str) -> String {
    if source.trim_start().starts_with("#version") {
        source.to_string()
    } else {
        format!("{}\n{}", crate::GLSL_VERSION, source)
    }
}

/// Reads a shader source file; the stage comes from the file extension
pub fn read_shader_file(path: &Path) -> Result<(ShaderStage, String), AppError> {
    let stage = ShaderStage::from_path(path).ok_or_else(|| {
        AppError::shader(&path.display().to_string(), "unknown shader stage")
    })?;
    let source = std::fs::read_to_string(path)?;
    Ok((stage, source))
}

/// A linked program plus its uniform locations, looked up once per name
pub struct ShaderProgram {
    program: glow::Program,
    locations: HashMap<String, Option<glow::UniformLocation>>,
}

impl ShaderProgram {
    pub fn use_program(&self, gl: &glow::Context) {
        unsafe {
            gl.use_program(Some(self.program));
        }
    }

    pub fn get_program(&self) -> glow::Program {
        self.program
    }

    fn location(&mut self, gl: &glow::Context, name: &str) -> Option<glow::UniformLocation> {
        let program = self.program;
        self.locations
            .entry(name.to_string())
            .or_insert_with(|| {
                let loc = unsafe { gl.get_uniform_location(program, name) };
                if loc.is_none() {
                    debug!("uniform '{}' not active in program", name);
                }
                loc
            })
            .clone()
    }

    pub fn set_mat4(&mut self, gl: &glow::Context, name: &str, value: &Mat4) {
        let loc = self.location(gl, name);
        unsafe {
            gl.uniform_matrix_4_f32_slice(loc.as_ref(), false, &value.to_cols_array());
        }
    }

    pub fn set_vec3(&mut self, gl: &glow::Context, name: &str, value: Vec3) {
        let loc = self.location(gl, name);
        unsafe {
            gl.uniform_3_f32(loc.as_ref(), value.x, value.y, value.z);
        }
    }

    pub fn set_vec4(&mut self, gl: &glow::Context, name: &str, value: Vec4) {
        let loc = self.location(gl, name);
        unsafe {
            gl.uniform_4_f32(loc.as_ref(), value.x, value.y, value.z, value.w);
        }
    }

    pub fn set_f32(&mut self, gl: &glow::Context, name: &str, value: f32) {
        let loc = self.location(gl, name);
        unsafe {
            gl.uniform_1_f32(loc.as_ref(), value);
        }
    }

    pub fn set_i32(&mut self, gl: &glow::Context, name: &str, value: i32) {
        let loc = self.location(gl, name);
        unsafe {
            gl.uniform_1_i32(loc.as_ref(), value);
        }
    }
}

pub struct ShaderManager {
    shaders: KeyedCache<glow::Shader>,
    programs: KeyedCache<ShaderProgram>,
}

impl Default for ShaderManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderManager {
    pub fn new() -> Self {
        Self {
            shaders: KeyedCache::new("shader"),
            programs: KeyedCache::new("shader program"),
        }
    }

    /// Stage is taken from the file extension
    pub fn load_shader_from_file(
        &mut self,
        gl: &glow::Context,
        key: &str,
        path: impl AsRef<Path>,
    ) -> Result<(), AppError> {
        let (stage, source) = read_shader_file(path.as_ref())?;
        self.load_shader_from_source(gl, key, stage, &source)
    }

    pub fn load_shader_from_source(
        &mut self,
        gl: &glow::Context,
        key: &str,
        stage: ShaderStage,
        source: &str,
    ) -> Result<(), AppError> {
        self.shaders.ensure_free(key)?;
        let shader = unsafe {
            let shader = gl
                .create_shader(stage.gl_enum())
                .map_err(|e| AppError::shader(key, e))?;
            gl.shader_source(shader, &with_version_header(source));
            gl.compile_shader(shader);
            if !gl.get_shader_compile_status(shader) {
                let msg = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(AppError::shader(key, format!("{:?} compilation failed: {}", stage, msg)));
            }
            shader
        };
        debug!("compiled {:?} shader '{}'", stage, key);
        self.shaders.insert(key, shader)?;
        Ok(())
    }

    /// Links previously loaded shaders into a program stored under `key`
    pub fn create_program(
        &mut self,
        gl: &glow::Context,
        key: &str,
        shader_keys: &[&str],
    ) -> Result<&mut ShaderProgram, AppError> {
        self.programs.ensure_free(key)?;
        let shaders = shader_keys
            .iter()
            .map(|k| self.shaders.get(k).copied())
            .collect::<Result<Vec<_>, _>>()?;

        let program = unsafe {
            let program = gl.create_program().map_err(|e| AppError::shader(key, e))?;
            for shader in &shaders {
                gl.attach_shader(program, *shader);
            }
            gl.link_program(program);
            for shader in &shaders {
                gl.detach_shader(program, *shader);
            }
            if !gl.get_program_link_status(program) {
                let msg = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(AppError::shader(key, format!("link failed: {}", msg)));
            }
            program
        };
        info!("linked shader program '{}' from {:?}", key, shader_keys);
        self.programs.insert(
            key,
            ShaderProgram {
                program,
                locations: HashMap::new(),
            },
        )
    }

    pub fn program(&self, key: &str) -> Result<&ShaderProgram, AppError> {
        self.programs.get(key)
    }

    pub fn program_mut(&mut self, key: &str) -> Result<&mut ShaderProgram, AppError> {
        self.programs.get_mut(key)
    }

    pub fn release_all(&mut self, gl: &glow::Context) {
        unsafe {
            for (_, program) in self.programs.drain() {
                gl.delete_program(program.program);
            }
            for (_, shader) in self.shaders.drain() {
                gl.delete_shader(shader);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_from_extension() {
        assert_eq!(ShaderStage::from_path(Path::new("a/b.vert")), Some(ShaderStage::Vertex));
        assert_eq!(ShaderStage::from_path(Path::new("b.frag")), Some(ShaderStage::Fragment));
        assert_eq!(ShaderStage::from_path(Path::new("b.geom")), Some(ShaderStage::Geometry));
        assert_eq!(ShaderStage::from_path(Path::new("b.glsl")), None);
        assert_eq!(ShaderStage::from_path(Path::new("shader")), None);
    }

    #[test]
    fn test_version_header() {
        let src = "void main() {}";
        let out = with_version_header(src);
        assert!(out.starts_with(crate::GLSL_VERSION));
        assert!(out.ends_with(src));

        let own = "#version 330 core\nvoid main() {}";
        assert_eq!(with_version_header(own), own);
    }

    #[test]
    fn test_read_shader_file() {
        // unit tests run from the package root
        let (stage, source) = read_shader_file(Path::new("assets/shaders/ground.frag")).unwrap();
        assert_eq!(stage, ShaderStage::Fragment);
        assert!(source.contains("u_ambient"));
        assert!(with_version_header(&source).starts_with(crate::GLSL_VERSION));
    }

    #[test]
    fn test_read_shader_file_errors() {
        assert!(matches!(
            read_shader_file(Path::new("assets/shaders/missing.vert")),
            Err(AppError::Io(_))
        ));
        assert!(matches!(
            read_shader_file(Path::new("assets/shaders/ground.txt")),
            Err(AppError::Shader { .. })
        ));
    }
}
