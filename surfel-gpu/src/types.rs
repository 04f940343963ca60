//! Host-side vertex structs, one per packed layout.
//!
//! Each struct must match the attribute offsets declared in [`crate::layout`] and the
//! vertex shader's inputs. All fields are `f32` arrays, so `#[repr(C)]` introduces no
//! padding and the structs can be cast straight to float slices.

use surfel_data::VertexRecord;

/// position, normal, color. 48 bytes.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct PointVertex {
    pub position: [f32; 4],
    pub normal: [f32; 4],
    pub color: [f32; 4],
}

/// [`PointVertex`] plus a texture coordinate. 56 bytes.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct TexturedPointVertex {
    pub position: [f32; 4],
    pub normal: [f32; 4],
    pub color: [f32; 4],
    pub tex_coord: [f32; 2],
}

/// Full surfel corner: [`TexturedPointVertex`] plus the camera-quad offset. 72 bytes.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct SurfelVertex {
    pub position: [f32; 4],
    pub normal: [f32; 4],
    pub color: [f32; 4],
    pub tex_coord: [f32; 2],
    pub quad_offset: [f32; 4],
}

const _: () = assert!(std::mem::size_of::<PointVertex>() == 48);
const _: () = assert!(std::mem::size_of::<TexturedPointVertex>() == 56);
const _: () = assert!(std::mem::size_of::<SurfelVertex>() == 72);

impl From<&VertexRecord> for PointVertex {
    fn from(r: &VertexRecord) -> Self {
        Self {
            position: r.position.to_array(),
            normal: r.normal.to_array(),
            color: r.color.to_array(),
        }
    }
}

impl From<&VertexRecord> for TexturedPointVertex {
    fn from(r: &VertexRecord) -> Self {
        Self {
            position: r.position.to_array(),
            normal: r.normal.to_array(),
            color: r.color.to_array(),
            tex_coord: r.tex_coord.to_array(),
        }
    }
}

impl From<&VertexRecord> for SurfelVertex {
    fn from(r: &VertexRecord) -> Self {
        Self {
            position: r.position.to_array(),
            normal: r.normal.to_array(),
            color: r.color.to_array(),
            tex_coord: r.tex_coord.to_array(),
            quad_offset: r.quad_offset.to_array(),
        }
    }
}
