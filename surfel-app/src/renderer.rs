//! Per-frame submission of the active buffer.

use crate::controller::PACK_LAYOUT;
use crate::errors::ViewerError;
use crate::state::ViewerState;
use surfel_data::math::flatten;
use surfel_gpu::{
    BlendMode, GpuError, GraphicsBackend, Handle, Primitive, RenderMode, Texture, VertexBuffer,
    FILTER_TEXTURE_SIZE, bind_attributes, surfel_filter_texture,
};
use tracing::{debug, trace};

const FILTER_TEXTURE_UNIT: u32 = 0;

/// What one call to [`FrameRenderer::render`] submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub draw_calls: usize,
    pub vertices: usize,
    pub uploaded: bool,
}

#[derive(Debug, Clone, Copy)]
struct Uploaded {
    generation: u64,
    handle: Handle<VertexBuffer>,
}

/// Owns the GPU-side copies of the viewer's resources.
#[derive(Debug, Default)]
pub struct FrameRenderer {
    filter_texture: Option<Handle<Texture>>,
    uploaded: Option<Uploaded>,
}

impl FrameRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn filter_texture<B: GraphicsBackend>(
        &mut self,
        backend: &mut B,
    ) -> Result<Handle<Texture>, GpuError> {
        if let Some(texture) = self.filter_texture {
            return Ok(texture);
        }
        let texture = backend.create_texture(
            FILTER_TEXTURE_SIZE,
            FILTER_TEXTURE_SIZE,
            &surfel_filter_texture(),
        )?;
        debug!("Created surfel filter texture {}", texture.id());
        self.filter_texture = Some(texture);
        Ok(texture)
    }

    /// Draw the current state. Re-uploads the vertex buffer only when the state
    /// replaced it since the last frame.
    pub fn render<B: GraphicsBackend>(
        &mut self,
        backend: &mut B,
        state: &ViewerState,
    ) -> Result<FrameStats, ViewerError> {
        let texture = self.filter_texture(backend)?;
        backend.clear();

        let Some(buffer) = state.buffer() else {
            return Ok(FrameStats::default());
        };
        let mut stats = FrameStats::default();

        let generation = state.buffer_generation();
        let handle = match self.uploaded {
            Some(up) if up.generation == generation => up.handle,
            _ => {
                let handle = backend.upload_vertices(buffer.data())?;
                debug!(
                    "Uploaded buffer generation {} ({} floats)",
                    generation,
                    buffer.data().len()
                );
                self.uploaded = Some(Uploaded { generation, handle });
                stats.uploaded = true;
                handle
            }
        };

        let bindings = bind_attributes(&*backend, PACK_LAYOUT, buffer)?;
        backend.bind_vertex_buffer(handle, &bindings);

        let uniform = |name: &str| {
            backend
                .uniform_location(name)
                .ok_or_else(|| GpuError::UnknownUniform(name.to_string()))
        };
        let mv = uniform("mv")?;
        let proj = uniform("proj")?;
        let on_points = uniform("onPoints")?;
        let sampler = uniform("textureSampler")?;

        backend.set_uniform_matrix(mv, &flatten(&state.view_matrix()));
        backend.set_uniform_matrix(proj, &flatten(&state.projection_matrix()));

        match buffer.mode() {
            RenderMode::Points => {
                backend.set_uniform_int(on_points, 1);
                backend.set_blend(BlendMode::Opaque);
                backend.draw_arrays(Primitive::Points, 0, buffer.vertex_count());
                stats.draw_calls = 1;
            }
            RenderMode::Surfels => {
                backend.set_uniform_int(on_points, 0);
                backend.set_blend(BlendMode::Alpha);
                backend.bind_texture(FILTER_TEXTURE_UNIT, texture);
                backend.set_uniform_int(sampler, FILTER_TEXTURE_UNIT as i32);
                let per_record = RenderMode::Surfels.vertices_per_record();
                for i in 0..buffer.record_count() {
                    backend.draw_arrays(Primitive::TriangleStrip, i * per_record, per_record);
                }
                stats.draw_calls = buffer.record_count();
            }
        }
        stats.vertices = buffer.vertex_count();
        trace!("Frame submitted: {:?}", stats);
        Ok(stats)
    }
}
