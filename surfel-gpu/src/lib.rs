//! Surfel GPU Crate
//!
//! Everything between parsed vertex records and the graphics API: interleaved vertex
//! layouts, the points/surfels packer, attribute binding with a stride guard, the
//! surfel filter texture, and the narrow collaborator traits the viewer drives.

pub mod backend;
pub mod binding;
mod error;
pub mod headless;
pub mod layout;
pub mod packer;
pub mod texture;
pub mod types;

pub use backend::{
    BlendMode, BufferUploader, GraphicsBackend, Handle, Primitive, RenderTarget, ShaderProgram,
    Texture, TextureProvider, VertexBuffer,
};
pub use binding::{AttributeBinding, bind_attributes};
pub use error::{GpuError, PackError};
pub use headless::{HeadlessBackend, RecordedCall};
pub use layout::{Attribute, AttributeKind, VertexLayout};
pub use packer::{PackedBuffer, QuadScale, RenderMode, SURFEL_CORNERS, SurfelCorner, pack};
pub use texture::{FILTER_TEXTURE_SIZE, surfel_filter_texture};
pub use types::{PointVertex, SurfelVertex, TexturedPointVertex};
