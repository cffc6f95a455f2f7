// GlTutor
// copyright gl_tutor developers 2024～2025

use gl_tutor::camera::OrbitCamera;
use gl_tutor::render::primitives::{self, Vertex};
use glam::{Mat4, Quat, Vec3, Vec4};

/// radians per pixel of mouse movement
pub const ROTATE_SPEED: f32 = 0.01;
/// world units per pixel of mouse movement
pub const PAN_SPEED: f32 = 0.05;
/// world units per wheel line
pub const ZOOM_PER_LINE: f32 = 2.0;
/// radians per second
pub const SPIN_SPEED: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Cube,
    Pyramid,
    Sphere,
    Torus,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Cube, Shape::Pyramid, Shape::Sphere, Shape::Torus];

    pub fn vertices(self) -> Vec<Vertex> {
        match self {
            Shape::Cube => primitives::cube(2.0),
            Shape::Pyramid => primitives::pyramid(2.0, 2.5),
            Shape::Sphere => primitives::sphere(1.2, 32, 16),
            Shape::Torus => primitives::torus(1.2, 0.4, 32, 16),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    pub shape: Shape,
    pub position: Vec3,
    pub color: Vec4,
    /// spins around the up axis while the tutorial runs
    pub spinning: bool,
}

pub fn default_camera() -> OrbitCamera {
    OrbitCamera::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y, 18.0, 3.0, 0.45, 0.8)
}

/// One of each shape on the corners of a square around the origin
pub fn showcase_objects() -> Vec<SceneObject> {
    let colors = [
        Vec4::new(0.9, 0.3, 0.2, 1.0),
        Vec4::new(0.9, 0.8, 0.2, 1.0),
        Vec4::new(0.2, 0.6, 0.9, 1.0),
        Vec4::new(0.3, 0.8, 0.4, 1.0),
    ];
    let corners = [
        Vec3::new(-4.0, 1.0, -4.0),
        Vec3::new(4.0, 0.0, -4.0),
        Vec3::new(-4.0, 1.2, 4.0),
        Vec3::new(4.0, 1.2, 4.0),
    ];
    Shape::ALL
        .iter()
        .zip(corners)
        .zip(colors)
        .map(|((&shape, position), color)| SceneObject {
            shape,
            position,
            color,
            spinning: shape != Shape::Sphere,
        })
        .collect()
}

pub struct OrbitModel {
    pub camera: OrbitCamera,
    pub objects: Vec<SceneObject>,
    spin: f32,
}

impl OrbitModel {
    pub fn new() -> Self {
        Self {
            camera: default_camera(),
            objects: showcase_objects(),
            spin: 0.0,
        }
    }

    /// Left button rotates around the center, right button pans it.
    /// `dx`/`dy` are the cursor movement of this frame in window pixels (y down).
    pub fn drag(&mut self, left: bool, right: bool, dx: f32, dy: f32) {
        if left {
            self.camera.rotate_polar(dx * ROTATE_SPEED);
            self.camera.rotate_azimuth(dy * ROTATE_SPEED);
        }
        if right {
            self.camera.move_horizontal(-dx * PAN_SPEED);
            self.camera.move_vertical(dy * PAN_SPEED);
        }
    }

    /// Wheel up zooms in
    pub fn scroll(&mut self, lines: f32) {
        self.camera.zoom(lines * ZOOM_PER_LINE);
    }

    pub fn reset_camera(&mut self) {
        self.camera = default_camera();
    }

    pub fn advance(&mut self, dt: f32) {
        self.spin = (self.spin + dt * SPIN_SPEED) % std::f32::consts::TAU;
    }

    pub fn model_matrix(&self, object: &SceneObject) -> Mat4 {
        let rotation = if object.spinning {
            Quat::from_rotation_y(self.spin)
        } else {
            Quat::IDENTITY
        };
        Mat4::from_rotation_translation(rotation, object.position)
    }
}
