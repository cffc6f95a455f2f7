// GlTutor
// copyright gl_tutor developers 2024～2025

use super::cache::KeyedCache;
use crate::error::AppError;
use glow::HasContext;
use image::{Rgba, RgbaImage};
use log::info;
use std::path::Path;

/// Byte size of a tightly packed RGBA8 image, None when it does not fit in memory
pub fn rgba_len(width: u32, height: u32) -> Option<usize> {
    (width as usize).checked_mul(height as usize)?.checked_mul(4)
}

/// Two color checkerboard of `size`×`size` pixels with `cells` squares per side
pub fn checker_image(size: u32, cells: u32, a: [u8; 4], b: [u8; 4]) -> RgbaImage {
    let cell = (size / cells.max(1)).max(1);
    RgbaImage::from_fn(size, size, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgba(a)
        } else {
            Rgba(b)
        }
    })
}

pub struct Texture {
    pub texture: glow::Texture,
    pub width: u32,
    pub height: u32,
    pub mipmaps: bool,
}

impl Texture {
    /// Uploads tightly packed RGBA8 pixels, first row at the bottom
    pub fn from_rgba(
        gl: &glow::Context,
        key: &str,
        width: u32,
        height: u32,
        data: &[u8],
        mipmaps: bool,
    ) -> Result<Self, AppError> {
        if rgba_len(width, height) != Some(data.len()) {
            return Err(AppError::texture(
                key,
                format!("expected {}x{} RGBA pixels, got {} bytes", width, height, data.len()),
            ));
        }
        let texture = unsafe { gl.create_texture().map_err(|e| AppError::texture(key, e))? };
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(data),
            );
            if mipmaps {
                gl.generate_mipmap(glow::TEXTURE_2D);
            }
            let min_filter = if mipmaps {
                glow::LINEAR_MIPMAP_LINEAR
            } else {
                glow::LINEAR
            };
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, min_filter as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.bind_texture(glow::TEXTURE_2D, None);
        }
        Ok(Self {
            texture,
            width,
            height,
            mipmaps,
        })
    }

    pub fn bind(&self, gl: &glow::Context, unit: u32) {
        unsafe {
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
        }
    }

    pub fn free(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_texture(self.texture);
        }
    }
}

pub struct TextureManager {
    textures: KeyedCache<Texture>,
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureManager {
    pub fn new() -> Self {
        Self {
            textures: KeyedCache::new("texture"),
        }
    }

    pub fn load_texture_2d(
        &mut self,
        gl: &glow::Context,
        key: &str,
        path: impl AsRef<Path>,
        mipmaps: bool,
    ) -> Result<&Texture, AppError> {
        let path = path.as_ref();
        self.textures.ensure_free(key)?;
        let img = image::open(path)
            .map_err(|e| AppError::texture(key, format!("{}: {}", path.display(), e)))?
            .to_rgba8();
        info!("texture '{}' loaded from {} ({}x{})", key, path.display(), img.width(), img.height());
        self.insert_image(gl, key, &img, mipmaps)
    }

    /// Uploads an image stored top row first, as image files are
    pub fn insert_image(
        &mut self,
        gl: &glow::Context,
        key: &str,
        img: &RgbaImage,
        mipmaps: bool,
    ) -> Result<&Texture, AppError> {
        self.textures.ensure_free(key)?;
        // GL expects the first row at the bottom
        let flipped = image::imageops::flip_vertical(img);
        let texture = Texture::from_rgba(gl, key, flipped.width(), flipped.height(), flipped.as_raw(), mipmaps)?;
        Ok(&*self.textures.insert(key, texture)?)
    }

    pub fn bind(&self, gl: &glow::Context, key: &str, unit: u32) -> Result<(), AppError> {
        self.textures.get(key)?.bind(gl, unit);
        Ok(())
    }

    pub fn release_all(&mut self, gl: &glow::Context) {
        for (_, texture) in self.textures.drain() {
            texture.free(gl);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_len() {
        assert_eq!(rgba_len(2, 3), Some(24));
        assert_eq!(rgba_len(0, 100), Some(0));
        #[cfg(target_pointer_width = "64")]
        {
            assert_eq!(rgba_len(u32::MAX, u32::MAX), None);
            // 4 GiB does not fit in a u32 product
            assert_eq!(rgba_len(65536, 16384), Some(1usize << 32));
        }
    }

    #[test]
    fn test_checker_image() {
        let a = [10, 20, 30, 255];
        let b = [200, 210, 220, 255];
        let img = checker_image(64, 4, a, b);
        assert_eq!(img.dimensions(), (64, 64));
        assert_eq!(img.as_raw().len(), rgba_len(64, 64).unwrap());
        assert_eq!(img.get_pixel(0, 0).0, a);
        assert_eq!(img.get_pixel(15, 15).0, a);
        assert_eq!(img.get_pixel(16, 0).0, b);
        assert_eq!(img.get_pixel(16, 16).0, a);
        assert_eq!(img.get_pixel(63, 0).0, b);
    }

    #[test]
    fn test_checker_more_cells_than_pixels() {
        let img = checker_image(4, 100, [0; 4], [255; 4]);
        assert_eq!(img.get_pixel(0, 0).0, [0; 4]);
        assert_eq!(img.get_pixel(1, 0).0, [255; 4]);
        let img = checker_image(4, 0, [0; 4], [255; 4]);
        assert_eq!(img.get_pixel(3, 3).0, [0; 4]);
    }

    #[test]
    fn test_shipped_ground_texture_decodes() {
        // unit tests run from the package root
        let img = image::open("assets/textures/ground.png").unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (256, 256));
        assert_eq!(img.as_raw().len(), rgba_len(256, 256).unwrap());
    }
}
