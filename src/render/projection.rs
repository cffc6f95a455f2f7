// GlTutor
// copyright gl_tutor developers 2024～2025

use crate::config::ProjectionConfig;
use glam::Mat4;

/// Perspective and orthographic matrices for the current window size.
///
/// Recomputed on every resize. A zero-sized window (minimised) keeps the previous
/// matrices since no aspect ratio can be derived from it.
#[derive(Debug, Clone)]
pub struct Projection {
    settings: ProjectionConfig,
    width: u32,
    height: u32,
    perspective: Mat4,
    ortho: Mat4,
}

impl Projection {
    pub fn new(settings: ProjectionConfig, width: u32, height: u32) -> Self {
        let mut projection = Self {
            settings,
            width: 0,
            height: 0,
            perspective: Mat4::IDENTITY,
            ortho: Mat4::IDENTITY,
        };
        projection.recalculate(width, height);
        projection
    }

    /// Returns false when the size was unusable and nothing changed
    pub fn recalculate(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.width = width;
        self.height = height;
        let (w, h) = (width as f32, height as f32);
        self.perspective = Mat4::perspective_rh_gl(
            self.settings.fov_degrees.to_radians(),
            w / h,
            self.settings.near,
            self.settings.far,
        );
        self.ortho = Mat4::orthographic_rh_gl(0.0, w, 0.0, h, -1.0, 1.0);
        true
    }

    pub fn perspective(&self) -> Mat4 {
        self.perspective
    }

    pub fn ortho(&self) -> Mat4 {
        self.ortho
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_ortho_maps_window_corners() {
        let p = Projection::new(ProjectionConfig::default(), 800, 600);
        let a = p.ortho().transform_point3(Vec3::new(0.0, 0.0, 0.0));
        let b = p.ortho().transform_point3(Vec3::new(800.0, 600.0, 0.0));
        assert!(a.abs_diff_eq(Vec3::new(-1.0, -1.0, 0.0), 1e-6));
        assert!(b.abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), 1e-6));
    }

    #[test]
    fn test_resize_recomputes_and_zero_is_ignored() {
        let mut p = Projection::new(ProjectionConfig::default(), 800, 600);
        let before = p.perspective();
        assert!(p.recalculate(1600, 600));
        assert_ne!(p.perspective(), before);
        assert_eq!((p.width(), p.height()), (1600, 600));

        let kept = p.perspective();
        assert!(!p.recalculate(0, 0));
        assert_eq!(p.perspective(), kept);
        assert_eq!((p.width(), p.height()), (1600, 600));
    }

    #[test]
    fn test_perspective_uses_config() {
        let cfg = ProjectionConfig {
            fov_degrees: 90.0,
            near: 1.0,
            far: 100.0,
        };
        let p = Projection::new(cfg, 100, 100);
        // a point on the near plane at the top edge of a 90 degree frustum
        let v = p.perspective().project_point3(Vec3::new(0.0, 1.0, -1.0));
        assert!((v.y - 1.0).abs() < 1e-5);
        assert!((v.z + 1.0).abs() < 1e-5);
    }
}
