//! Headless backend that records every call instead of touching a GPU.
//!
//! Used by the `surfel-viewer` binary when no display is available and by tests to
//! assert on what a frame would have submitted.

use crate::backend::{
    BlendMode, BufferUploader, Handle, Primitive, RenderTarget, ShaderProgram, Texture,
    TextureProvider, VertexBuffer,
};
use crate::binding::AttributeBinding;
use crate::GpuError;
use std::collections::HashMap;
use tracing::debug;

const DEFAULT_ATTRIBUTES: [&str; 5] = ["vPosition", "vNormal", "vColor", "texCoord", "vSquare"];
const DEFAULT_UNIFORMS: [&str; 4] = ["mv", "proj", "onPoints", "textureSampler"];

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    UploadVertices { handle: u64, floats: usize },
    CreateTexture { handle: u64, width: u32, height: u32 },
    Clear,
    BindVertexBuffer { handle: u64, bindings: Vec<AttributeBinding> },
    UniformMatrix { location: u32, columns: [f32; 16] },
    UniformInt { location: u32, value: i32 },
    Blend(BlendMode),
    BindTexture { unit: u32, handle: u64 },
    Draw { primitive: Primitive, first: usize, count: usize },
}

/// Recording implementation of every collaborator trait.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    attributes: HashMap<String, u32>,
    uniforms: HashMap<String, u32>,
    next_handle: u64,
    calls: Vec<RecordedCall>,
}

impl HeadlessBackend {
    /// Backend whose program exposes every attribute and uniform the viewer uses.
    pub fn new() -> Self {
        let mut backend = Self::with_attributes(&DEFAULT_ATTRIBUTES);
        backend.uniforms = DEFAULT_UNIFORMS
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), i as u32))
            .collect();
        backend
    }

    /// Backend whose program only exposes `names`, and no uniforms.
    pub fn with_attributes(names: &[&str]) -> Self {
        Self {
            attributes: names
                .iter()
                .enumerate()
                .map(|(i, name)| (name.to_string(), i as u32))
                .collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }

    /// Drain recorded calls, e.g. between frames.
    pub fn take_calls(&mut self) -> Vec<RecordedCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn draws(&self) -> impl Iterator<Item = (Primitive, usize, usize)> + '_ {
        self.calls.iter().filter_map(|call| match call {
            RecordedCall::Draw {
                primitive,
                first,
                count,
            } => Some((*primitive, *first, *count)),
            _ => None,
        })
    }

    fn allocate(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl ShaderProgram for HeadlessBackend {
    fn attribute_location(&self, name: &str) -> Option<u32> {
        self.attributes.get(name).copied()
    }

    fn uniform_location(&self, name: &str) -> Option<u32> {
        self.uniforms.get(name).copied()
    }
}

impl BufferUploader for HeadlessBackend {
    fn upload_vertices(&mut self, data: &[f32]) -> Result<Handle<VertexBuffer>, GpuError> {
        let handle = self.allocate();
        debug!("Uploading {} floats as buffer {}", data.len(), handle);
        self.calls.push(RecordedCall::UploadVertices {
            handle,
            floats: data.len(),
        });
        Ok(Handle::new(handle))
    }
}

impl TextureProvider for HeadlessBackend {
    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Result<Handle<Texture>, GpuError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(GpuError::TextureSize {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }
        let handle = self.allocate();
        self.calls.push(RecordedCall::CreateTexture {
            handle,
            width,
            height,
        });
        Ok(Handle::new(handle))
    }
}

impl RenderTarget for HeadlessBackend {
    fn clear(&mut self) {
        self.calls.push(RecordedCall::Clear);
    }

    fn bind_vertex_buffer(&mut self, buffer: Handle<VertexBuffer>, bindings: &[AttributeBinding]) {
        self.calls.push(RecordedCall::BindVertexBuffer {
            handle: buffer.id(),
            bindings: bindings.to_vec(),
        });
    }

    fn set_uniform_matrix(&mut self, location: u32, columns: &[f32; 16]) {
        self.calls.push(RecordedCall::UniformMatrix {
            location,
            columns: *columns,
        });
    }

    fn set_uniform_int(&mut self, location: u32, value: i32) {
        self.calls.push(RecordedCall::UniformInt { location, value });
    }

    fn set_blend(&mut self, blend: BlendMode) {
        self.calls.push(RecordedCall::Blend(blend));
    }

    fn bind_texture(&mut self, unit: u32, texture: Handle<Texture>) {
        self.calls.push(RecordedCall::BindTexture {
            unit,
            handle: texture.id(),
        });
    }

    fn draw_arrays(&mut self, primitive: Primitive, first: usize, count: usize) {
        self.calls.push(RecordedCall::Draw {
            primitive,
            first,
            count,
        });
    }
}
