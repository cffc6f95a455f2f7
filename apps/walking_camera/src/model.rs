// GlTutor
// copyright gl_tutor developers 2024～2025

use gl_tutor::camera::WalkingCamera;
use gl_tutor::render::primitives::{self, Vertex};
use glam::{Mat4, Vec3, Vec4};

pub const MOVE_SPEED: f32 = 12.0;
pub const ROTATION_SPEED: f32 = 1.5;
pub const GROUND_SIZE: f32 = 200.0;
/// texture repeats across the ground, one tile per grid cell
pub const GROUND_TILES: f32 = GROUND_SIZE / GRID_SPACING;
/// objects per side of the square grid
pub const GRID_SIZE: usize = 7;
pub const GRID_SPACING: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Pyramid,
    Cube,
    Torus,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Pyramid, Shape::Cube, Shape::Torus];

    pub fn vertices(self) -> Vec<Vertex> {
        match self {
            Shape::Pyramid => primitives::pyramid(3.0, 4.0),
            Shape::Cube => primitives::cube(2.5),
            Shape::Torus => primitives::torus(1.5, 0.5, 24, 12),
        }
    }

    /// lift so the shape rests on the ground
    fn base_height(self) -> f32 {
        match self {
            Shape::Pyramid => 0.0,
            Shape::Cube => 1.25,
            Shape::Torus => 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridObject {
    pub shape: Shape,
    pub position: Vec3,
    pub color: Vec4,
}

impl GridObject {
    pub fn model_matrix(&self) -> Mat4 {
        let m = Mat4::from_translation(self.position);
        if self.shape == Shape::Torus {
            // stand the ring up so it can be walked through
            m * Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2)
        } else {
            m
        }
    }
}

/// `size` x `size` objects centered on the origin, shapes cycling along each row
pub fn object_grid(size: usize, spacing: f32) -> Vec<GridObject> {
    let half = (size as f32 - 1.0) / 2.0;
    let mut objects = Vec::with_capacity(size * size);
    for row in 0..size {
        for col in 0..size {
            let shape = Shape::ALL[(row + col) % Shape::ALL.len()];
            let x = (col as f32 - half) * spacing;
            let z = (row as f32 - half) * spacing;
            let shade = 0.4 + 0.6 * (row * size + col) as f32 / (size * size) as f32;
            objects.push(GridObject {
                shape,
                position: Vec3::new(x, shape.base_height(), z),
                color: Vec4::new(shade, 0.9 - shade * 0.5, 1.0 - shade, 1.0),
            });
        }
    }
    objects
}

/// Eye height above the ground, looking along -Z from the south edge of the grid
pub fn default_camera() -> WalkingCamera {
    let start_z = GRID_SIZE as f32 * GRID_SPACING / 2.0 + 10.0;
    WalkingCamera::new(
        Vec3::new(0.0, 3.0, start_z),
        Vec3::new(0.0, 3.0, start_z - 1.0),
        Vec3::Y,
        MOVE_SPEED,
        ROTATION_SPEED,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_is_centered() {
        let objects = object_grid(GRID_SIZE, GRID_SPACING);
        assert_eq!(objects.len(), GRID_SIZE * GRID_SIZE);
        let sum: Vec3 = objects.iter().map(|o| Vec3::new(o.position.x, 0.0, o.position.z)).sum();
        assert!(sum.length() < 1e-3);
        let max_x = objects.iter().fold(f32::MIN, |m, o| m.max(o.position.x));
        assert_eq!(max_x, 30.0);
    }

    #[test]
    fn test_grid_cycles_shapes() {
        let objects = object_grid(3, 5.0);
        let shapes: Vec<_> = objects.iter().take(3).map(|o| o.shape).collect();
        assert_eq!(shapes, Shape::ALL.to_vec());
        // the next row starts one shape later
        assert_eq!(objects[3].shape, Shape::Cube);
    }

    #[test]
    fn test_objects_rest_on_ground() {
        for o in object_grid(4, 8.0) {
            let lowest = o
                .shape
                .vertices()
                .iter()
                .map(|v| o.model_matrix().transform_point3(Vec3::from(v.position)).y)
                .fold(f32::MAX, f32::min);
            assert!(lowest.abs() < 1e-3, "{:?} floats at {}", o.shape, lowest);
        }
    }

    #[test]
    fn test_camera_starts_outside_grid() {
        let cam = default_camera();
        let edge = GRID_SIZE as f32 * GRID_SPACING / 2.0;
        assert!(cam.position().z > edge);
        assert!(cam.normalized_view_vector().abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert!(cam.position().y > 0.0);
    }
}
