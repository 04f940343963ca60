//! Indexed triangle mesh ingestion.
//!
//! Layout: `V T x0 y0 z0 ... x(V-1) y(V-1) z(V-1) i0 i1 i2 ...`. Index triples are read
//! until the input runs out; the declared triangle count `T` is advisory only.

use crate::math::point;
use crate::normals::synthesize;
use crate::{FormatError, Tokens, VertexRecord};
use glam::Vec4;
use tracing::{debug, warn};

const VERTEX_COUNT_TOKEN: usize = 0;
const TRIANGLE_COUNT_TOKEN: usize = 1;
const POSITIONS_START_TOKEN: usize = 2;

/// Indexed triangle mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex positions, w = 1.
    pub positions: Vec<Vec4>,
    /// Flat index list, three per triangle.
    pub indices: Vec<u32>,
    /// Triangle count announced in the header, which may disagree with `indices`.
    pub declared_triangles: usize,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }

    /// Whether the header's triangle count matches what was actually parsed.
    pub fn is_consistent(&self) -> bool {
        self.declared_triangles == self.triangle_count()
    }

    /// Combine positions with synthesized normals and a flat color.
    pub fn to_records(&self, color: Vec4) -> Vec<VertexRecord> {
        let normals = synthesize(self);
        self.positions
            .iter()
            .zip(normals)
            .map(|(&position, normal)| VertexRecord::new(position, normal, color))
            .collect()
    }
}

/// Parse the indexed mesh format.
#[tracing::instrument(skip_all, fields(bytes = input.len()))]
pub fn parse_mesh(input: &str) -> Result<Mesh, FormatError> {
    let tokens = Tokens::new(input);
    tokens.require(POSITIONS_START_TOKEN)?;

    let vertex_count = tokens.usize(VERTEX_COUNT_TOKEN)?;
    let declared_triangles = tokens.usize(TRIANGLE_COUNT_TOKEN)?;
    let index_start = vertex_count
        .checked_mul(3)
        .and_then(|n| n.checked_add(POSITIONS_START_TOKEN))
        .ok_or(FormatError::Truncated {
            expected: usize::MAX,
            found: tokens.len(),
        })?;
    tokens.require(index_start)?;

    let mut positions = Vec::with_capacity(vertex_count);
    for v in 0..vertex_count {
        let base = POSITIONS_START_TOKEN + 3 * v;
        positions.push(point(
            tokens.f32(base)?,
            tokens.f32(base + 1)?,
            tokens.f32(base + 2)?,
        ));
    }

    let index_tokens = tokens.len() - index_start;
    if index_tokens % 3 != 0 {
        return Err(FormatError::PartialTriangle {
            leftover: index_tokens % 3,
        });
    }

    let mut indices = Vec::with_capacity(index_tokens);
    for i in 0..index_tokens {
        let index = tokens.u32(index_start + i)?;
        if index as usize >= vertex_count {
            return Err(FormatError::IndexOutOfRange {
                triangle: i / 3,
                index,
                vertex_count,
            });
        }
        indices.push(index);
    }

    let mesh = Mesh {
        positions,
        indices,
        declared_triangles,
    };

    if !mesh.is_consistent() {
        warn!(
            "Mesh header declares {} triangles but {} were parsed",
            declared_triangles,
            mesh.triangle_count()
        );
    }
    debug!(
        "Parsed mesh: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}
