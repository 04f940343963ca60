//! Contracts for the graphics collaborators the viewer drives.
//!
//! The viewer never talks to a graphics API directly. Shader compilation, buffer and
//! texture creation, and draw submission live behind these traits.

use crate::binding::AttributeBinding;
use crate::GpuError;
use std::marker::PhantomData;

/// Type-safe opaque resource handle.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Handle<T> {
    pub id: u64,
    _phantom: PhantomData<T>,
}

impl<T> Handle<T> {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

// Derives would bound `T: Copy`.
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

/// Marker for uploaded vertex buffers.
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum VertexBuffer {}

/// Marker for uploaded textures.
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum Texture {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Points,
    TriangleStrip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    Opaque,
    /// src_alpha, one_minus_src_alpha.
    Alpha,
}

/// A linked shader program, queried by name.
pub trait ShaderProgram {
    fn attribute_location(&self, name: &str) -> Option<u32>;
    fn uniform_location(&self, name: &str) -> Option<u32>;
}

/// Uploads flat float data as a vertex buffer.
pub trait BufferUploader {
    fn upload_vertices(&mut self, data: &[f32]) -> Result<Handle<VertexBuffer>, GpuError>;
}

/// Creates RGBA8 textures with linear filtering.
pub trait TextureProvider {
    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Result<Handle<Texture>, GpuError>;
}

/// Frame-level state changes and draw submission.
pub trait RenderTarget {
    fn clear(&mut self);
    fn bind_vertex_buffer(&mut self, buffer: Handle<VertexBuffer>, bindings: &[AttributeBinding]);
    fn set_uniform_matrix(&mut self, location: u32, columns: &[f32; 16]);
    fn set_uniform_int(&mut self, location: u32, value: i32);
    fn set_blend(&mut self, blend: BlendMode);
    fn bind_texture(&mut self, unit: u32, texture: Handle<Texture>);
    fn draw_arrays(&mut self, primitive: Primitive, first: usize, count: usize);
}

/// Everything a frame needs from the graphics layer.
pub trait GraphicsBackend: ShaderProgram + BufferUploader + TextureProvider + RenderTarget {}

impl<T> GraphicsBackend for T where
    T: ShaderProgram + BufferUploader + TextureProvider + RenderTarget
{
}
