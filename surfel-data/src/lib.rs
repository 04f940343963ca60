//! Surfel Data Crate
//!
//! Ingestion of ASCII geometry (indexed triangle meshes and colored point clouds),
//! per-vertex normal synthesis, and the small vector/matrix kernel the rest of the
//! workspace builds on. This crate is GPU-agnostic.

mod error;
pub mod math;
pub mod mesh;
pub mod normals;
pub mod point_cloud;
pub mod tokens;
pub mod types;

pub use error::FormatError;
pub use mesh::{Mesh, parse_mesh};
pub use normals::synthesize;
pub use point_cloud::{
    ColorEncoding, DATA_START_TOKEN, HEADER_TOKENS, PREAMBLE_TOKENS, PointRecord,
    RECORD_TOKENS, VERTEX_COUNT_TOKEN, parse_point_cloud,
};
pub use tokens::Tokens;
pub use types::VertexRecord;
