//! CPU-side vertex record shared by both ingest paths.
//!
//! GPU-specific layouts with bytemuck derive live in surfel-gpu.

use glam::{Vec2, Vec4};

/// One vertex worth of attributes before packing.
///
/// Not every dataset populates every field; the unused ones stay zero and the
/// active shader binding simply does not read them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexRecord {
    /// Position, w = 1.
    pub position: Vec4,
    /// Normal direction, w = 0.
    pub normal: Vec4,
    /// RGBA color, normalized 0-1.
    pub color: Vec4,
    pub tex_coord: Vec2,
    pub quad_offset: Vec4,
}

impl VertexRecord {
    /// Record with position, normal and color; texture coordinate and quad offset zeroed.
    pub fn new(position: Vec4, normal: Vec4, color: Vec4) -> Self {
        Self {
            position,
            normal,
            color,
            tex_coord: Vec2::ZERO,
            quad_offset: Vec4::ZERO,
        }
    }

    pub fn with_tex_coord(mut self, tex_coord: Vec2) -> Self {
        self.tex_coord = tex_coord;
        self
    }

    pub fn with_quad_offset(mut self, quad_offset: Vec4) -> Self {
        self.quad_offset = quad_offset;
        self
    }
}

impl Default for VertexRecord {
    fn default() -> Self {
        Self {
            position: Vec4::W,
            normal: Vec4::ZERO,
            color: Vec4::ZERO,
            tex_coord: Vec2::ZERO,
            quad_offset: Vec4::ZERO,
        }
    }
}
