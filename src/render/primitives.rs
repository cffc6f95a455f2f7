// GlTutor
// copyright gl_tutor developers 2024～2025

//! CPU side generators for the static meshes used by the tutorials.
//!
//! All generators emit non-indexed triangle lists, counter-clockwise when seen from
//! outside, centered on the origin (the pyramid and the ground sit on y = 0).

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Interleaved vertex layout shared by every static mesh:
/// location 0 position, location 1 normal, location 2 texture coordinate
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, tex_coord: [f32; 2]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            tex_coord,
        }
    }
}

pub fn cube(size: f32) -> Vec<Vertex> {
    let h = size / 2.0;
    // normal, u axis, v axis with u x v = normal
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let mut vertices = Vec::with_capacity(36);
    for (n, u, v) in faces {
        let corner = |su: f32, sv: f32| {
            Vertex::new(
                (n + u * su + v * sv) * h,
                n,
                [(su + 1.0) / 2.0, (sv + 1.0) / 2.0],
            )
        };
        let quad = [
            corner(-1.0, -1.0),
            corner(1.0, -1.0),
            corner(1.0, 1.0),
            corner(-1.0, 1.0),
        ];
        vertices.extend_from_slice(&[quad[0], quad[1], quad[2], quad[0], quad[2], quad[3]]);
    }
    vertices
}

/// Square base of side `base` on y = 0, apex at (0, height, 0)
pub fn pyramid(base: f32, height: f32) -> Vec<Vertex> {
    let h = base / 2.0;
    let apex = Vec3::new(0.0, height, 0.0);
    let corners = [
        Vec3::new(-h, 0.0, h),
        Vec3::new(h, 0.0, h),
        Vec3::new(h, 0.0, -h),
        Vec3::new(-h, 0.0, -h),
    ];
    let mut vertices = Vec::with_capacity(18);
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        let n = (b - a).cross(apex - a).normalize();
        vertices.push(Vertex::new(a, n, [0.0, 0.0]));
        vertices.push(Vertex::new(b, n, [1.0, 0.0]));
        vertices.push(Vertex::new(apex, n, [0.5, 1.0]));
    }
    let uv = |p: Vec3| [(p.x + h) / base, (p.z + h) / base];
    for idx in [0, 3, 2, 0, 2, 1] {
        let p = corners[idx];
        vertices.push(Vertex::new(p, Vec3::NEG_Y, uv(p)));
    }
    vertices
}

/// Flat ground on y = 0 facing up; texture coordinates repeat `tiles` times per side
pub fn plane_ground(size: f32, tiles: f32) -> Vec<Vertex> {
    let h = size / 2.0;
    let quad = [
        Vertex::new(Vec3::new(-h, 0.0, h), Vec3::Y, [0.0, 0.0]),
        Vertex::new(Vec3::new(h, 0.0, h), Vec3::Y, [tiles, 0.0]),
        Vertex::new(Vec3::new(h, 0.0, -h), Vec3::Y, [tiles, tiles]),
        Vertex::new(Vec3::new(-h, 0.0, -h), Vec3::Y, [0.0, tiles]),
    ];
    vec![quad[0], quad[1], quad[2], quad[0], quad[2], quad[3]]
}

/// `slices` segments around the Y axis, `stacks` from pole to pole
pub fn sphere(radius: f32, slices: u32, stacks: u32) -> Vec<Vertex> {
    let slices = slices.max(3);
    let stacks = stacks.max(2);
    let point = |stack: u32, slice: u32| {
        let theta = PI * stack as f32 / stacks as f32;
        let phi = TAU * slice as f32 / slices as f32;
        let n = Vec3::new(theta.sin() * phi.cos(), theta.cos(), -theta.sin() * phi.sin());
        Vertex::new(
            n * radius,
            n,
            [slice as f32 / slices as f32, 1.0 - stack as f32 / stacks as f32],
        )
    };
    grid(stacks, slices, point)
}

/// Ring of radius `main_radius` around the Y axis with a tube of `tube_radius`
pub fn torus(main_radius: f32, tube_radius: f32, main_segments: u32, tube_segments: u32) -> Vec<Vertex> {
    let main_segments = main_segments.max(3);
    let tube_segments = tube_segments.max(3);
    let point = |main: u32, tube: u32| {
        let u = TAU * main as f32 / main_segments as f32;
        let v = TAU * tube as f32 / tube_segments as f32;
        let n = Vec3::new(v.cos() * u.cos(), v.sin(), -v.cos() * u.sin());
        let center = Vec3::new(u.cos(), 0.0, -u.sin()) * main_radius;
        Vertex::new(
            center + n * tube_radius,
            n,
            [main as f32 / main_segments as f32, tube as f32 / tube_segments as f32],
        )
    };
    grid(main_segments, tube_segments, point)
}

// two triangles per cell of a rows x cols parametric grid
fn grid<F>(rows: u32, cols: u32, point: F) -> Vec<Vertex>
where
    F: Fn(u32, u32) -> Vertex,
{
    let mut vertices = Vec::with_capacity((rows * cols * 6) as usize);
    for i in 0..rows {
        for j in 0..cols {
            let a = point(i, j);
            let b = point(i + 1, j);
            let c = point(i + 1, j + 1);
            let d = point(i, j + 1);
            vertices.extend_from_slice(&[a, b, c, a, c, d]);
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(v: &Vertex) -> Vec3 {
        Vec3::from(v.position)
    }

    // every non-degenerate triangle faces the side its normals point to
    fn assert_outward(vertices: &[Vertex]) {
        assert_eq!(vertices.len() % 3, 0);
        for tri in vertices.chunks(3) {
            let face = (pos(&tri[1]) - pos(&tri[0])).cross(pos(&tri[2]) - pos(&tri[0]));
            if face.length() < 1e-6 {
                continue;
            }
            let n: Vec3 = tri.iter().map(|v| Vec3::from(v.normal)).sum();
            assert!(face.dot(n) > 0.0, "inward triangle {:?}", tri);
        }
    }

    fn assert_unit_normals(vertices: &[Vertex]) {
        for v in vertices {
            assert!((Vec3::from(v.normal).length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_cube() {
        let v = cube(2.0);
        assert_eq!(v.len(), 36);
        assert_outward(&v);
        assert_unit_normals(&v);
        for p in v.iter().map(pos) {
            assert!((p.abs().max_element() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_pyramid() {
        let v = pyramid(2.0, 3.0);
        assert_eq!(v.len(), 18);
        assert_outward(&v);
        assert_unit_normals(&v);
        let top = v.iter().map(pos).fold(f32::MIN, |m, p| m.max(p.y));
        assert_eq!(top, 3.0);
        assert!(v.iter().all(|x| x.position[1] >= 0.0));
    }

    #[test]
    fn test_plane_ground() {
        let v = plane_ground(100.0, 20.0);
        assert_eq!(v.len(), 6);
        assert_outward(&v);
        assert!(v.iter().all(|x| x.position[1] == 0.0));
        let max_uv = v.iter().fold(0.0f32, |m, x| m.max(x.tex_coord[0]).max(x.tex_coord[1]));
        assert_eq!(max_uv, 20.0);
    }

    #[test]
    fn test_sphere() {
        let v = sphere(3.0, 16, 8);
        assert_eq!(v.len(), 16 * 8 * 6);
        assert_outward(&v);
        assert_unit_normals(&v);
        for x in &v {
            assert!((pos(x).length() - 3.0).abs() < 1e-4);
            assert!(pos(x).abs_diff_eq(Vec3::from(x.normal) * 3.0, 1e-4));
        }
    }

    #[test]
    fn test_torus() {
        let v = torus(4.0, 1.0, 12, 6);
        assert_eq!(v.len(), 12 * 6 * 6);
        assert_outward(&v);
        assert_unit_normals(&v);
        for x in v.iter().map(pos) {
            // distance to the ring is the tube radius
            let ring = Vec3::new(x.x, 0.0, x.z).normalize() * 4.0;
            assert!(((x - ring).length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_degenerate_segment_counts_are_raised() {
        assert_eq!(sphere(1.0, 0, 0).len(), 3 * 2 * 6);
        assert_eq!(torus(2.0, 0.5, 1, 1).len(), 3 * 3 * 6);
    }
}
