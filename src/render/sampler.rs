// GlTutor
// copyright gl_tutor developers 2024～2025

use super::cache::KeyedCache;
use crate::error::AppError;
use glow::HasContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagFilter {
    Nearest,
    Bilinear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinFilter {
    Nearest,
    Bilinear,
    NearestMipmap,
    BilinearMipmap,
    Trilinear,
}

impl MagFilter {
    fn gl_enum(self) -> u32 {
        match self {
            MagFilter::Nearest => glow::NEAREST,
            MagFilter::Bilinear => glow::LINEAR,
        }
    }
}

impl MinFilter {
    fn gl_enum(self) -> u32 {
        match self {
            MinFilter::Nearest => glow::NEAREST,
            MinFilter::Bilinear => glow::LINEAR,
            MinFilter::NearestMipmap => glow::NEAREST_MIPMAP_NEAREST,
            MinFilter::BilinearMipmap => glow::LINEAR_MIPMAP_NEAREST,
            MinFilter::Trilinear => glow::LINEAR_MIPMAP_LINEAR,
        }
    }
}

pub struct SamplerManager {
    samplers: KeyedCache<glow::Sampler>,
}

impl Default for SamplerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SamplerManager {
    pub fn new() -> Self {
        Self {
            samplers: KeyedCache::new("sampler"),
        }
    }

    /// Creates a sampler repeating in both directions
    pub fn create_sampler(
        &mut self,
        gl: &glow::Context,
        key: &str,
        mag: MagFilter,
        min: MinFilter,
    ) -> Result<(), AppError> {
        self.samplers.ensure_free(key)?;
        let sampler = unsafe {
            let sampler = gl.create_sampler().map_err(|e| AppError::texture(key, e))?;
            gl.sampler_parameter_i32(sampler, glow::TEXTURE_MAG_FILTER, mag.gl_enum() as i32);
            gl.sampler_parameter_i32(sampler, glow::TEXTURE_MIN_FILTER, min.gl_enum() as i32);
            gl.sampler_parameter_i32(sampler, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.sampler_parameter_i32(sampler, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            sampler
        };
        self.samplers.insert(key, sampler)?;
        Ok(())
    }

    pub fn bind(&self, gl: &glow::Context, key: &str, unit: u32) -> Result<(), AppError> {
        let sampler = self.samplers.get(key)?;
        unsafe {
            gl.bind_sampler(unit, Some(*sampler));
        }
        Ok(())
    }

    pub fn release_all(&mut self, gl: &glow::Context) {
        for (_, sampler) in self.samplers.drain() {
            unsafe {
                gl.delete_sampler(sampler);
            }
        }
    }
}
