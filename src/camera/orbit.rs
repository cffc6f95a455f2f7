// GlTutor
// copyright gl_tutor developers 2024～2025

//! Orbit camera: the eye sits on a sphere around `center`.
//!
//! * azimuth is the elevation angle, clamped just short of the poles so the view basis
//!   never degenerates,
//! * polar is the angle around the up axis, always kept in [0, 2π),
//! * radius is the distance from the center, never below `min_radius`.

use super::look_at_from_basis;
use glam::{Mat4, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// keeps azimuth away from exactly ±π/2
pub const AZIMUTH_EPSILON: f32 = 0.001;

pub const MAX_AZIMUTH: f32 = FRAC_PI_2 - AZIMUTH_EPSILON;

/// smallest allowed minimum radius, the eye must never reach the center
pub const MIN_RADIUS_EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    center: Vec3,
    up: Vec3,
    radius: f32,
    min_radius: f32,
    azimuth: f32,
    polar: f32,
}

impl OrbitCamera {
    pub fn new(center: Vec3, up: Vec3, radius: f32, min_radius: f32, azimuth: f32, polar: f32) -> Self {
        let min_radius = min_radius.max(MIN_RADIUS_EPSILON);
        let mut camera = Self {
            center,
            up,
            radius: radius.max(min_radius),
            min_radius,
            azimuth: 0.0,
            polar: 0.0,
        };
        camera.rotate_azimuth(azimuth);
        camera.rotate_polar(polar);
        camera
    }

    pub fn rotate_azimuth(&mut self, radians: f32) {
        self.azimuth = (self.azimuth + radians).clamp(-MAX_AZIMUTH, MAX_AZIMUTH);
    }

    pub fn rotate_polar(&mut self, radians: f32) {
        let mut polar = (self.polar + radians) % TAU;
        if polar < 0.0 {
            polar += TAU;
        }
        // -tiny % TAU + TAU rounds to TAU in f32
        if polar >= TAU {
            polar = 0.0;
        }
        self.polar = polar;
    }

    pub fn zoom(&mut self, by: f32) {
        self.radius = (self.radius - by).max(self.min_radius);
    }

    /// Pans the center along the camera's right vector
    pub fn move_horizontal(&mut self, distance: f32) {
        let right = self.forward().cross(self.up).normalize();
        self.center += right * distance;
    }

    /// Pans the center along the fixed up vector
    pub fn move_vertical(&mut self, distance: f32) {
        self.center += self.up * distance;
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let horizontal = self.radius * cos_azimuth;

        self.center
            + Vec3::new(
                horizontal * cos_polar,
                self.radius * sin_azimuth,
                horizontal * sin_polar,
            )
    }

    /// Normalized direction from the eye to the center
    pub fn forward(&self) -> Vec3 {
        (self.center - self.eye()).normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        look_at_from_basis(self.eye(), self.forward(), self.up)
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn min_radius(&self) -> f32 {
        self.min_radius
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(Vec3::ZERO, Vec3::Y, 10.0, 2.0, 0.0, 0.0)
    }

    #[test]
    fn test_eye_at_zero_angles() {
        let eye = OrbitCamera::new(Vec3::ZERO, Vec3::Y, 7.5, 1.0, 0.0, 0.0).eye();
        assert!(eye.abs_diff_eq(Vec3::new(7.5, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn test_eye_components() {
        let mut cam = OrbitCamera::new(Vec3::new(1.0, 2.0, 3.0), Vec3::Y, 4.0, 1.0, 0.0, 0.0);
        cam.rotate_polar(std::f32::consts::FRAC_PI_2);
        assert!(cam.eye().abs_diff_eq(Vec3::new(1.0, 2.0, 7.0), 1e-5));
        cam.rotate_azimuth(std::f32::consts::FRAC_PI_6);
        let eye = cam.eye();
        assert!((eye.y - (2.0 + 4.0 * 0.5)).abs() < 1e-5);
        assert!(((eye - cam.center()).length() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_polar_always_normalized() {
        let mut cam = camera();
        let deltas = [0.3, -1.0, 7.0, -20.0, 6.283_185, -6.283_185, 100.0, -0.000_001, 3.0, -3.2];
        for _ in 0..50 {
            for d in deltas {
                cam.rotate_polar(d);
                assert!(cam.polar() >= 0.0 && cam.polar() < TAU, "polar {}", cam.polar());
            }
        }
    }

    #[test]
    fn test_polar_wraps_negative() {
        let mut cam = camera();
        cam.rotate_polar(-0.5);
        assert!((cam.polar() - (TAU - 0.5)).abs() < 1e-5);
    }

    #[test]
    fn test_azimuth_clamped() {
        let mut cam = camera();
        for d in [0.5, 0.5, 0.5, 0.5, 10.0, -0.2, -30.0, 1.0, -5.0, 100.0] {
            cam.rotate_azimuth(d);
            assert!(cam.azimuth() >= -MAX_AZIMUTH && cam.azimuth() <= MAX_AZIMUTH);
        }
        cam.rotate_azimuth(10.0);
        assert_eq!(cam.azimuth(), MAX_AZIMUTH);
        cam.rotate_azimuth(-10.0);
        assert_eq!(cam.azimuth(), -MAX_AZIMUTH);
        // still a usable view at the clamp
        assert!(cam.view_matrix().is_finite());
    }

    #[test]
    fn test_zoom_never_below_min() {
        let mut cam = camera();
        for d in [3.0, 3.0, 3.0, -1.0, 50.0, -4.0, 0.5, 0.5, 0.5, 0.5, 0.5] {
            cam.zoom(d);
            assert!(cam.radius() >= cam.min_radius());
        }
        cam.zoom(1000.0);
        assert_eq!(cam.radius(), 2.0);
        cam.zoom(-3.0);
        assert_eq!(cam.radius(), 5.0);
    }

    #[test]
    fn test_new_clamps_radius() {
        let cam = OrbitCamera::new(Vec3::ZERO, Vec3::Y, 0.1, 1.0, 0.0, -1.0);
        assert_eq!(cam.radius(), 1.0);
        assert!(cam.polar() > 0.0);
    }

    #[test]
    fn test_non_positive_min_radius() {
        for min in [0.0, -5.0] {
            let mut cam = OrbitCamera::new(Vec3::ZERO, Vec3::Y, 0.0, min, 0.0, 0.0);
            cam.zoom(100.0);
            assert_eq!(cam.min_radius(), MIN_RADIUS_EPSILON);
            assert_eq!(cam.radius(), MIN_RADIUS_EPSILON);
            assert!(cam.forward().is_finite());
            assert!(cam.view_matrix().is_finite());
        }
    }

    #[test]
    fn test_pan_keeps_angles() {
        let mut cam = camera();
        cam.rotate_azimuth(0.3);
        cam.rotate_polar(1.2);
        let (az, pol, r) = (cam.azimuth(), cam.polar(), cam.radius());
        let forward = cam.forward();

        cam.move_horizontal(2.0);
        let right = forward.cross(Vec3::Y).normalize();
        assert!(cam.center().abs_diff_eq(right * 2.0, 1e-5));
        cam.move_vertical(-1.5);
        assert!(cam.center().abs_diff_eq(right * 2.0 - Vec3::Y * 1.5, 1e-5));

        assert_eq!((cam.azimuth(), cam.polar(), cam.radius()), (az, pol, r));
        assert!(cam.forward().abs_diff_eq(forward, 1e-5));
    }

    #[test]
    fn test_view_matrix_matches_look_at() {
        let mut cam = OrbitCamera::new(Vec3::new(0.0, 1.0, -2.0), Vec3::Y, 12.0, 1.0, 0.4, 2.1);
        cam.move_horizontal(0.7);
        let expected = Mat4::look_at_rh(cam.eye(), cam.center(), Vec3::Y);
        assert!(cam.view_matrix().abs_diff_eq(expected, 1e-4));
        // the center projects onto the view axis
        let c = cam.view_matrix().transform_point3(cam.center());
        assert!(c.x.abs() < 1e-4 && c.y.abs() < 1e-4);
        assert!((c.z + 12.0).abs() < 1e-3);
    }
}
