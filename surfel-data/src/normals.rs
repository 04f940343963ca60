//! Per-vertex normal synthesis for indexed meshes.
//!
//! Face normals are accumulated onto incident vertices without angle or area
//! weighting, then every sum is renormalized once all triangles are in.

use crate::Mesh;
use crate::math::{cross, normalize, subtract};
use glam::Vec4;
use tracing::debug;

/// Synthesize one normal per position.
///
/// A vertex referenced by no triangle gets the zero vector.
pub fn synthesize(mesh: &Mesh) -> Vec<Vec4> {
    let mut normals = vec![Vec4::ZERO; mesh.positions.len()];

    for [i0, i1, i2] in mesh.triangles() {
        let p0 = mesh.positions[i0];
        let e1 = normalize(subtract(mesh.positions[i1], p0));
        let e2 = normalize(subtract(mesh.positions[i2], p0));
        let n = normalize(cross(e1, e2));

        normals[i0] += n;
        normals[i1] += n;
        normals[i2] += n;
    }

    // Accumulation must be complete before this pass.
    let mut isolated = 0;
    for n in normals.iter_mut() {
        if *n == Vec4::ZERO {
            isolated += 1;
        }
        *n = normalize(*n);
    }

    if isolated > 0 {
        debug!("{} vertices have no incident triangles", isolated);
    }
    normals
}
