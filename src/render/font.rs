// GlTutor
// copyright gl_tutor developers 2024～2025

//! Bitmap fonts for HUD text.
//!
//! The printable ASCII range is rasterised once by fontdue and packed into a single
//! channel atlas texture. Layout works in window pixels with y pointing up, so the
//! result can be drawn directly with the orthographic matrix.

use super::cache::KeyedCache;
use crate::config::AssetConfig;
use crate::error::AppError;
use glow::HasContext;
use log::{debug, info, warn};
use std::path::Path;

pub const FIRST_CHAR: u8 = b' ';
pub const LAST_CHAR: u8 = b'~';
/// key under which `ensure_default` stores the HUD font
pub const DEFAULT_FONT_KEY: &str = "default";

/// DejaVu Sans Mono, see assets/fonts/LICENSE-DejaVu.txt
pub const EMBEDDED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansMono.ttf");

const ATLAS_WIDTH: u32 = 512;
const PADDING: u32 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlyphInfo {
    pub advance: f32,
    pub width: u32,
    pub height: u32,
    /// offset of the bitmap's left edge from the pen position
    pub xmin: i32,
    /// offset of the bitmap's bottom edge from the baseline, positive up
    pub ymin: i32,
    /// u0, v0 (top), u1, v1 (bottom) in the atlas
    pub uv: [f32; 4],
}

/// Glyph metrics and layout, independent of any GL object
#[derive(Debug, Clone)]
pub struct GlyphSet {
    glyphs: Vec<GlyphInfo>,
    ascent: f32,
    line_height: f32,
}

impl GlyphSet {
    /// `glyphs` covers FIRST_CHAR..=LAST_CHAR in order
    pub fn new(glyphs: Vec<GlyphInfo>, ascent: f32, line_height: f32) -> Self {
        Self {
            glyphs,
            ascent,
            line_height,
        }
    }

    /// Characters outside the atlas are drawn as '?'
    pub fn glyph(&self, c: char) -> GlyphInfo {
        let idx = |c: u8| (c - FIRST_CHAR) as usize;
        let i = match c {
            ' '..='~' => idx(c as u8),
            _ => idx(b'?'),
        };
        self.glyphs.get(i).copied().unwrap_or_default()
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Width of the widest line
    pub fn text_width(&self, text: &str) -> f32 {
        text.lines()
            .map(|line| line.chars().map(|c| self.glyph(c).advance).sum::<f32>())
            .fold(0.0, f32::max)
    }

    pub fn text_height(&self, text: &str) -> f32 {
        text.lines().count() as f32 * self.line_height
    }

    /// Builds two triangles per visible glyph as `[x, y, u, v]` vertices.
    ///
    /// (x, y) is the bottom-left corner of the whole text block.
    pub fn layout(&self, text: &str, x: f32, y: f32) -> Vec<[f32; 4]> {
        let top = y + self.text_height(text);
        let mut vertices = Vec::with_capacity(text.len() * 6);
        for (row, line) in text.lines().enumerate() {
            let baseline = top - self.ascent - row as f32 * self.line_height;
            let mut pen = x;
            for c in line.chars() {
                let g = self.glyph(c);
                if g.width > 0 && g.height > 0 {
                    let x0 = pen + g.xmin as f32;
                    let y0 = baseline + g.ymin as f32;
                    let x1 = x0 + g.width as f32;
                    let y1 = y0 + g.height as f32;
                    let [u0, v0, u1, v1] = g.uv;
                    vertices.extend_from_slice(&[
                        [x0, y0, u0, v1],
                        [x1, y0, u1, v1],
                        [x1, y1, u1, v0],
                        [x0, y0, u0, v1],
                        [x1, y1, u1, v0],
                        [x0, y1, u0, v0],
                    ]);
                }
                pen += g.advance;
            }
        }
        vertices
    }
}

/// Where every glyph rectangle sits in the atlas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasLayout {
    /// top-left corner of every rectangle, in input order
    pub positions: Vec<(u32, u32)>,
    pub width: u32,
    pub height: u32,
}

/// Row packing. The atlas is `min_width` wide unless a single rectangle needs more.
pub fn pack_rows(sizes: &[(u32, u32)], min_width: u32) -> AtlasLayout {
    let widest = sizes.iter().map(|&(w, _)| w).max().unwrap_or(0);
    let width = min_width.max(widest + 2 * PADDING);
    let mut positions = Vec::with_capacity(sizes.len());
    let (mut x, mut y, mut row_height) = (PADDING, PADDING, 0);
    for &(w, h) in sizes {
        // an empty row takes anything
        if x > PADDING && x + w + PADDING > width {
            x = PADDING;
            y += row_height + PADDING;
            row_height = 0;
        }
        positions.push((x, y));
        x += w + PADDING;
        row_height = row_height.max(h);
    }
    AtlasLayout {
        positions,
        width,
        height: y + row_height + PADDING,
    }
}

/// Single channel coverage image of FIRST_CHAR..=LAST_CHAR plus the matching metrics
pub struct AtlasImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub glyphs: GlyphSet,
}

pub fn rasterise_atlas(font: &fontdue::Font, key: &str, size: f32) -> Result<AtlasImage, AppError> {
    if !(size.is_finite() && size > 0.0) {
        return Err(AppError::font(key, format!("invalid font size {}", size)));
    }
    let line = font
        .horizontal_line_metrics(size)
        .ok_or_else(|| AppError::font(key, "font has no horizontal metrics"))?;

    let rasterised: Vec<_> = (FIRST_CHAR..=LAST_CHAR)
        .map(|c| font.rasterize(c as char, size))
        .collect();
    let sizes: Vec<_> = rasterised
        .iter()
        .map(|(m, _)| (m.width as u32, m.height as u32))
        .collect();
    let layout = pack_rows(&sizes, ATLAS_WIDTH);
    let (width, height) = (layout.width as usize, layout.height as usize);

    let mut pixels = vec![0u8; width * height];
    let mut glyphs = Vec::with_capacity(rasterised.len());
    for ((metrics, bitmap), &(px, py)) in rasterised.iter().zip(&layout.positions) {
        for row in 0..metrics.height {
            let src = row * metrics.width;
            let dst = (py as usize + row) * width + px as usize;
            pixels[dst..dst + metrics.width].copy_from_slice(&bitmap[src..src + metrics.width]);
        }
        glyphs.push(GlyphInfo {
            advance: metrics.advance_width,
            width: metrics.width as u32,
            height: metrics.height as u32,
            xmin: metrics.xmin,
            ymin: metrics.ymin,
            uv: [
                px as f32 / width as f32,
                py as f32 / height as f32,
                (px as usize + metrics.width) as f32 / width as f32,
                (py as usize + metrics.height) as f32 / height as f32,
            ],
        });
    }

    Ok(AtlasImage {
        pixels,
        width: layout.width,
        height: layout.height,
        glyphs: GlyphSet::new(glyphs, line.ascent, line.new_line_size),
    })
}

pub struct BitmapFont {
    glyphs: GlyphSet,
    atlas: glow::Texture,
    size: f32,
}

impl BitmapFont {
    pub fn from_file(
        gl: &glow::Context,
        key: &str,
        path: impl AsRef<Path>,
        size: f32,
    ) -> Result<Self, AppError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| AppError::font(key, format!("{}: {}", path.display(), e)))?;
        let font = Self::from_bytes(gl, key, &bytes, size)?;
        info!("font '{}' loaded from {}", key, path.display());
        Ok(font)
    }

    pub fn from_bytes(gl: &glow::Context, key: &str, bytes: &[u8], size: f32) -> Result<Self, AppError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| AppError::font(key, e))?;
        let image = rasterise_atlas(&font, key, size)?;

        let atlas = unsafe {
            let texture = gl.create_texture().map_err(|e| AppError::font(key, e))?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::R8 as i32,
                image.width as i32,
                image.height as i32,
                0,
                glow::RED,
                glow::UNSIGNED_BYTE,
                Some(&image.pixels),
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
            gl.bind_texture(glow::TEXTURE_2D, None);
            texture
        };
        debug!("font '{}' at {}px, atlas {}x{}", key, size, image.width, image.height);

        Ok(Self {
            glyphs: image.glyphs,
            atlas,
            size,
        })
    }

    pub fn glyphs(&self) -> &GlyphSet {
        &self.glyphs
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn bind(&self, gl: &glow::Context, unit: u32) {
        unsafe {
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.atlas));
        }
    }

    pub fn free(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_texture(self.atlas);
        }
    }
}

pub struct FontManager {
    fonts: KeyedCache<BitmapFont>,
}

impl Default for FontManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FontManager {
    pub fn new() -> Self {
        Self {
            fonts: KeyedCache::new("font"),
        }
    }

    /// Loads the configured HUD font the first time it is asked for.
    /// Falls back to the built-in font when the configured file is missing.
    pub fn ensure_default(
        &mut self,
        gl: &glow::Context,
        assets: &AssetConfig,
    ) -> Result<&BitmapFont, AppError> {
        let font = self.fonts.get_or_try_insert_with(DEFAULT_FONT_KEY, || {
            let path = assets.path(&assets.default_font);
            if path.is_file() {
                BitmapFont::from_file(gl, DEFAULT_FONT_KEY, path, assets.default_font_size)
            } else {
                warn!("{} not found, using the built-in font", path.display());
                BitmapFont::from_bytes(gl, DEFAULT_FONT_KEY, EMBEDDED_FONT, assets.default_font_size)
            }
        })?;
        Ok(&*font)
    }

    pub fn get(&self, key: &str) -> Result<&BitmapFont, AppError> {
        self.fonts.get(key)
    }

    pub fn release_all(&mut self, gl: &glow::Context) {
        for (_, font) in self.fonts.drain() {
            font.free(gl);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // every glyph 10 wide, 12 high, sitting 2 below the baseline
    fn mono() -> GlyphSet {
        let glyphs = (FIRST_CHAR..=LAST_CHAR)
            .map(|c| GlyphInfo {
                advance: 10.0,
                width: if c == b' ' { 0 } else { 8 },
                height: if c == b' ' { 0 } else { 12 },
                xmin: 1,
                ymin: -2,
                uv: [0.0, 0.0, 0.5, 0.25],
            })
            .collect();
        GlyphSet::new(glyphs, 14.0, 20.0)
    }

    #[test]
    fn test_measure() {
        let g = mono();
        assert_eq!(g.text_width("FPS: 60"), 70.0);
        assert_eq!(g.text_width("ab\nabcd\nc"), 40.0);
        assert_eq!(g.text_height("one line"), 20.0);
        assert_eq!(g.text_height("a\nb\nc"), 60.0);
        assert_eq!(g.text_width(""), 0.0);
        assert_eq!(g.text_height(""), 0.0);
    }

    #[test]
    fn test_non_ascii_falls_back() {
        let g = mono();
        assert_eq!(g.glyph('é'), g.glyph('?'));
        assert_eq!(g.text_width("né"), 20.0);
    }

    #[test]
    fn test_layout_quads() {
        let g = mono();
        let v = g.layout("A B", 100.0, 50.0);
        // the space produces no quad
        assert_eq!(v.len(), 12);
        // baseline = 50 + 20 - 14 = 56, bottom = 54, left = 101
        assert_eq!(v[0], [101.0, 54.0, 0.0, 0.25]);
        assert_eq!(v[2], [109.0, 66.0, 0.5, 0.0]);
        // second glyph starts two advances later
        assert_eq!(v[6][0], 121.0);
    }

    #[test]
    fn test_layout_multiline_goes_down() {
        let g = mono();
        let v = g.layout("A\nA", 0.0, 0.0);
        assert_eq!(v.len(), 12);
        assert_eq!(v[6][1], v[0][1] - 20.0);
        assert_eq!(v[6][0], v[0][0]);
    }

    #[test]
    fn test_pack_rows_wraps() {
        let sizes = vec![(10, 5), (10, 8), (10, 3)];
        let layout = pack_rows(&sizes, 25);
        assert_eq!(layout.positions, vec![(1, 1), (12, 1), (1, 10)]);
        assert_eq!(layout.width, 25);
        assert_eq!(layout.height, 14);
    }

    fn assert_inside(sizes: &[(u32, u32)], layout: &AtlasLayout) {
        for (&(w, h), &(x, y)) in sizes.iter().zip(&layout.positions) {
            assert!(x + w + PADDING <= layout.width, "{}+{} past {}", x, w, layout.width);
            assert!(y + h + PADDING <= layout.height);
        }
    }

    #[test]
    fn test_pack_rows_widens_for_wide_glyph() {
        let sizes = vec![(600, 10)];
        let layout = pack_rows(&sizes, 512);
        assert_eq!(layout.positions, vec![(1, 1)]);
        assert_eq!(layout.width, 602);
        assert_eq!(layout.height, 12);
        assert_inside(&sizes, &layout);

        let sizes = vec![(100, 20), (700, 30), (50, 5), (600, 8)];
        let layout = pack_rows(&sizes, 512);
        assert_inside(&sizes, &layout);
        assert_eq!(layout.width, 702);
        // wrapping never leaves an empty row
        assert_eq!(layout.positions, vec![(1, 1), (1, 22), (1, 53), (52, 53)]);
    }

    #[test]
    fn test_pack_rows_empty() {
        let layout = pack_rows(&[], 512);
        assert!(layout.positions.is_empty());
        assert_eq!(layout.width, 512);
        assert_eq!(layout.height, 2);
    }

    #[test]
    fn test_rasterise_builtin_font() {
        let font = fontdue::Font::from_bytes(EMBEDDED_FONT, fontdue::FontSettings::default()).unwrap();
        let atlas = rasterise_atlas(&font, "builtin", 18.0).unwrap();
        assert_eq!(atlas.pixels.len(), (atlas.width * atlas.height) as usize);
        assert!(atlas.width >= 512);
        // mono font: every printable glyph advances the same
        let g = &atlas.glyphs;
        assert_eq!(g.glyph('i').advance, g.glyph('W').advance);
        assert_eq!(g.glyph(' ').width, 0);
        assert!(g.glyph('A').width > 0 && g.glyph('A').height > 0);
        for c in ' '..='~' {
            let [u0, v0, u1, v1] = g.glyph(c).uv;
            assert!(0.0 <= u0 && u0 <= u1 && u1 <= 1.0, "{:?}", c);
            assert!(0.0 <= v0 && v0 <= v1 && v1 <= 1.0, "{:?}", c);
        }
        assert!(atlas.pixels.iter().any(|&p| p > 0));
    }

    #[test]
    fn test_rasterise_rejects_bad_size() {
        let font = fontdue::Font::from_bytes(EMBEDDED_FONT, fontdue::FontSettings::default()).unwrap();
        for size in [0.0, -4.0, f32::NAN] {
            assert!(matches!(
                rasterise_atlas(&font, "builtin", size),
                Err(AppError::Font { .. })
            ));
        }
    }
}
