// GlTutor
// copyright gl_tutor developers 2024～2025

//! Walking camera: moves along its view vector and turns left/right around world up.
//! Only yaw is supported, so the up vector never needs to be re-derived.

use crate::event::Key;
use glam::{Mat4, Quat, Vec3};

/// Key bindings polled every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkingControls {
    pub forward: Key,
    pub backward: Key,
    pub rotate_left: Key,
    pub rotate_right: Key,
}

impl Default for WalkingControls {
    fn default() -> Self {
        Self {
            forward: Key::W,
            backward: Key::S,
            rotate_left: Key::A,
            rotate_right: Key::D,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkingCamera {
    position: Vec3,
    view_point: Vec3,
    up: Vec3,
    /// units per second
    move_speed: f32,
    /// radians per second
    rotation_speed: f32,
    controls: WalkingControls,
}

impl WalkingCamera {
    pub fn new(position: Vec3, view_point: Vec3, up: Vec3, move_speed: f32, rotation_speed: f32) -> Self {
        Self {
            position,
            view_point,
            up,
            move_speed,
            rotation_speed,
            controls: WalkingControls::default(),
        }
    }

    pub fn set_controls(&mut self, controls: WalkingControls) {
        self.controls = controls;
    }

    pub fn controls(&self) -> WalkingControls {
        self.controls
    }

    /// Polls the bound keys and moves the camera.
    ///
    /// `key_pressed` answers whether a key is held, `sof` scales a per-second speed
    /// by the last frame time so movement does not depend on the frame rate.
    pub fn update<K, S>(&mut self, mut key_pressed: K, sof: S)
    where
        K: FnMut(Key) -> bool,
        S: Fn(f32) -> f32,
    {
        if key_pressed(self.controls.forward) {
            self.move_by(sof(self.move_speed));
        }
        if key_pressed(self.controls.backward) {
            self.move_by(-sof(self.move_speed));
        }
        if key_pressed(self.controls.rotate_left) {
            self.rotate_by(sof(self.rotation_speed));
        }
        if key_pressed(self.controls.rotate_right) {
            self.rotate_by(-sof(self.rotation_speed));
        }
    }

    /// Moves position and view point together along the view vector
    pub fn move_by(&mut self, distance: f32) {
        let offset = self.normalized_view_vector() * distance;
        self.position += offset;
        self.view_point += offset;
    }

    /// Turns the view vector around world up; positive angles turn left
    pub fn rotate_by(&mut self, radians: f32) {
        let rotated = Quat::from_axis_angle(Vec3::Y, radians) * self.normalized_view_vector();
        self.view_point = self.position + rotated;
    }

    pub fn normalized_view_vector(&self) -> Vec3 {
        (self.view_point - self.position).normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.view_point, self.up)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn view_point(&self) -> Vec3 {
        self.view_point
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn camera() -> WalkingCamera {
        WalkingCamera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -5.0), Vec3::Y, 10.0, 2.0)
    }

    #[test]
    fn test_move_by_keeps_direction() {
        let mut cam = camera();
        cam.move_by(3.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, -3.0), 1e-6));
        assert!(cam.view_point().abs_diff_eq(Vec3::new(0.0, 0.0, -8.0), 1e-6));
        cam.move_by(-1.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, -2.0), 1e-6));
    }

    #[test]
    fn test_rotate_left_turns_towards_negative_x() {
        let mut cam = camera();
        cam.rotate_by(FRAC_PI_2);
        assert!(cam.normalized_view_vector().abs_diff_eq(Vec3::NEG_X, 1e-5));
        cam.rotate_by(-FRAC_PI_2);
        assert!(cam.normalized_view_vector().abs_diff_eq(Vec3::NEG_Z, 1e-5));
        // up is never touched
        assert_eq!(cam.up(), Vec3::Y);
    }

    #[test]
    fn test_update_scales_by_frame_time() {
        let mut cam = camera();
        let held = [Key::W];
        cam.update(|k| held.contains(&k), |v| v * 0.5);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, -5.0), 1e-5));

        let held = [Key::S, Key::A];
        cam.update(|k| held.contains(&k), |v| v * 0.25);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, -2.5), 1e-5));
        let expected = Quat::from_axis_angle(Vec3::Y, 0.5) * Vec3::NEG_Z;
        assert!(cam.normalized_view_vector().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut cam = camera();
        let start = cam;
        cam.update(|_| true, |v| v * 0.1);
        assert!(cam.position().abs_diff_eq(start.position(), 1e-5));
        assert!(cam
            .normalized_view_vector()
            .abs_diff_eq(start.normalized_view_vector(), 1e-5));
    }

    #[test]
    fn test_custom_controls() {
        let mut cam = camera();
        cam.set_controls(WalkingControls {
            forward: Key::Up,
            backward: Key::Down,
            rotate_left: Key::Left,
            rotate_right: Key::Right,
        });
        cam.update(|k| k == Key::W, |v| v);
        assert_eq!(cam.position(), Vec3::ZERO);
        cam.update(|k| k == Key::Up, |v| v * 0.1);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-5));
    }

    #[test]
    fn test_view_matrix_looks_at_view_point() {
        let cam = WalkingCamera::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 2.0, -1.0), Vec3::Y, 1.0, 1.0);
        let p = cam.view_matrix().transform_point3(cam.view_point());
        assert!(p.x.abs() < 1e-5 && p.y.abs() < 1e-5 && p.z < 0.0);
    }
}
