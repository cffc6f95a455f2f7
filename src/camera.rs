// GlTutor
// copyright gl_tutor developers 2024～2025

//! Cameras used by the tutorials. Both are pure math on glam types and never touch OpenGL.
//!
//! orbit: spherical coordinates around a center point, driven by the mouse.
//! walking: explicit position and view point, driven by four keys every frame.

pub mod orbit;
pub mod walking;

pub use orbit::OrbitCamera;
pub use walking::{WalkingCamera, WalkingControls};

use glam::{Mat4, Vec3, Vec4};

/// Right-handed look-at matrix assembled from an explicit orthonormal basis.
///
/// `forward` must be normalized. The result equals `Mat4::look_at_rh(eye, eye + forward, up)`.
pub fn look_at_from_basis(eye: Vec3, forward: Vec3, up: Vec3) -> Mat4 {
    let right = forward.cross(up).normalize();
    let true_up = right.cross(forward);

    Mat4::from_cols(
        Vec4::new(right.x, true_up.x, -forward.x, 0.0),
        Vec4::new(right.y, true_up.y, -forward.y, 0.0),
        Vec4::new(right.z, true_up.z, -forward.z, 0.0),
        Vec4::new(-right.dot(eye), -true_up.dot(eye), forward.dot(eye), 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_at_from_basis_matches_glam() {
        let eye = Vec3::new(3.0, 4.0, -2.0);
        let target = Vec3::new(-1.0, 0.5, 2.0);
        let up = Vec3::Y;
        let ours = look_at_from_basis(eye, (target - eye).normalize(), up);
        let glam = Mat4::look_at_rh(eye, target, up);
        assert!(ours.abs_diff_eq(glam, 1e-5));
    }
}
