//! Vector and matrix kernel.
//!
//! Thin, value-semantics helpers over `glam` so the rest of the workspace speaks in
//! homogeneous `Vec4` points (w = 1) and directions (w = 0). Angles are in degrees,
//! matching how the interaction layer accumulates them.

use glam::{Mat4, Vec3, Vec4};

/// Homogeneous point, w = 1.
#[inline]
pub fn point(x: f32, y: f32, z: f32) -> Vec4 {
    Vec4::new(x, y, z, 1.0)
}

/// Homogeneous direction, w = 0.
#[inline]
pub fn direction(x: f32, y: f32, z: f32) -> Vec4 {
    Vec4::new(x, y, z, 0.0)
}

#[inline]
pub fn add(a: Vec4, b: Vec4) -> Vec4 {
    a + b
}

/// Component-wise difference. Two points yield a direction (w = 0).
#[inline]
pub fn subtract(a: Vec4, b: Vec4) -> Vec4 {
    a - b
}

/// Dot product of the xyz parts.
#[inline]
pub fn dot(a: Vec4, b: Vec4) -> f32 {
    a.truncate().dot(b.truncate())
}

/// Cross product of the xyz parts; the result is a direction.
#[inline]
pub fn cross(a: Vec4, b: Vec4) -> Vec4 {
    a.truncate().cross(b.truncate()).extend(0.0)
}

/// Unit-length copy of `v`. The zero vector normalizes to itself.
#[inline]
pub fn normalize(v: Vec4) -> Vec4 {
    v.normalize_or_zero()
}

/// Perspective projection with OpenGL clip conventions.
pub fn perspective(fovy_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh_gl(fovy_degrees.to_radians(), aspect, near, far)
}

/// Right-handed look-at view matrix.
pub fn look_at(eye: Vec4, target: Vec4, up: Vec4) -> Mat4 {
    Mat4::look_at_rh(to_vec3(eye), to_vec3(target), to_vec3(up))
}

pub fn rotate_x(degrees: f32) -> Mat4 {
    Mat4::from_rotation_x(degrees.to_radians())
}

pub fn rotate_y(degrees: f32) -> Mat4 {
    Mat4::from_rotation_y(degrees.to_radians())
}

/// Column-major float array, ready for a uniform upload.
#[inline]
pub fn flatten(m: &Mat4) -> [f32; 16] {
    m.to_cols_array()
}

#[inline]
fn to_vec3(v: Vec4) -> Vec3 {
    v.truncate()
}
