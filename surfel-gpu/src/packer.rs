//! Vertex buffer packer.
//!
//! Projects vertex records into one flat interleaved float buffer. In points mode
//! every record becomes one vertex; in surfels mode every record becomes the four
//! corners of a camera-aligned quad, emitted in triangle-strip order.

use crate::layout::{AttributeKind, VertexLayout};
use crate::types::{PointVertex, SurfelVertex, TexturedPointVertex};
use crate::PackError;
use glam::{Vec2, Vec4};
use std::fmt;
use surfel_data::VertexRecord;
use tracing::debug;

/// How each sample is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// One vertex per sample, drawn as a point primitive.
    Points,
    /// Four vertices per sample, drawn as a textured triangle strip.
    #[default]
    Surfels,
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Points => write!(f, "Points"),
            RenderMode::Surfels => write!(f, "Surfels"),
        }
    }
}

impl RenderMode {
    /// Vertices emitted per input record.
    pub fn vertices_per_record(self) -> usize {
        match self {
            RenderMode::Points => 1,
            RenderMode::Surfels => 4,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            RenderMode::Points => RenderMode::Surfels,
            RenderMode::Surfels => RenderMode::Points,
        }
    }
}

/// Surfel footprint. Width spans the z axis, height the y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadScale {
    pub half_width: f32,
    pub half_height: f32,
}

impl QuadScale {
    pub fn new(half_width: f32, half_height: f32) -> Self {
        Self {
            half_width,
            half_height,
        }
    }
}

impl Default for QuadScale {
    fn default() -> Self {
        Self::new(0.025, 0.0075)
    }
}

/// One quad corner: texture coordinate plus the signs applied to height and width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfelCorner {
    pub tex_coord: Vec2,
    pub height_sign: f32,
    pub width_sign: f32,
}

impl SurfelCorner {
    pub fn offset(&self, quad: QuadScale) -> Vec4 {
        Vec4::new(
            0.0,
            self.height_sign * quad.half_height,
            self.width_sign * quad.half_width,
            0.0,
        )
    }
}

/// Top-right, bottom-right, top-left, bottom-left. This order keeps the strip from
/// folding over itself.
pub const SURFEL_CORNERS: [SurfelCorner; 4] = [
    SurfelCorner {
        tex_coord: Vec2::new(1.0, 1.0),
        height_sign: 1.0,
        width_sign: 1.0,
    },
    SurfelCorner {
        tex_coord: Vec2::new(1.0, 0.0),
        height_sign: 1.0,
        width_sign: -1.0,
    },
    SurfelCorner {
        tex_coord: Vec2::new(0.0, 1.0),
        height_sign: -1.0,
        width_sign: 1.0,
    },
    SurfelCorner {
        tex_coord: Vec2::new(0.0, 0.0),
        height_sign: -1.0,
        width_sign: -1.0,
    },
];

/// Flat interleaved vertex data plus the layout that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedBuffer {
    data: Vec<f32>,
    layout: VertexLayout,
    mode: RenderMode,
    vertex_count: usize,
}

impl PackedBuffer {
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of input samples the buffer was built from.
    pub fn record_count(&self) -> usize {
        self.vertex_count / self.mode.vertices_per_record()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    /// Native-endian view for zero-copy uploads.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Little-endian byte image, independent of host endianness.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    /// Read vertex `index` back out of the buffer. Attributes missing from the layout
    /// come back as zero.
    pub fn vertex(&self, index: usize) -> Option<VertexRecord> {
        if index >= self.vertex_count {
            return None;
        }
        let stride = self.layout.stride_floats();
        let record = &self.data[index * stride..(index + 1) * stride];
        let read4 = |kind| {
            self.layout
                .attribute(kind)
                .map(|a| Vec4::from_slice(&record[a.offset_floats()..a.offset_floats() + 4]))
                .unwrap_or(Vec4::ZERO)
        };
        let tex_coord = self
            .layout
            .attribute(AttributeKind::TexCoord)
            .map(|a| Vec2::from_slice(&record[a.offset_floats()..a.offset_floats() + 2]))
            .unwrap_or(Vec2::ZERO);

        Some(VertexRecord {
            position: read4(AttributeKind::Position),
            normal: read4(AttributeKind::Normal),
            color: read4(AttributeKind::Color),
            tex_coord,
            quad_offset: read4(AttributeKind::QuadOffset),
        })
    }
}

/// Pack `records` for `mode` into `layout`.
///
/// Surfels need a layout carrying both texture coordinates and quad offsets.
pub fn pack(
    records: &[VertexRecord],
    mode: RenderMode,
    layout: VertexLayout,
    quad: QuadScale,
) -> Result<PackedBuffer, PackError> {
    let expanded: Vec<VertexRecord> = match mode {
        RenderMode::Points => records.to_vec(),
        RenderMode::Surfels => {
            for missing in [AttributeKind::TexCoord, AttributeKind::QuadOffset] {
                if !layout.has(missing) {
                    return Err(PackError::MissingAttribute {
                        missing,
                        stride: layout.stride_bytes(),
                    });
                }
            }
            records
                .iter()
                .flat_map(|r| {
                    SURFEL_CORNERS.iter().map(move |corner| {
                        r.with_tex_coord(corner.tex_coord)
                            .with_quad_offset(corner.offset(quad))
                    })
                })
                .collect()
        }
    };

    let data = if layout == VertexLayout::SURFEL {
        interleave::<SurfelVertex>(&expanded)
    } else if layout == VertexLayout::POINT_TEXTURED {
        interleave::<TexturedPointVertex>(&expanded)
    } else {
        interleave::<PointVertex>(&expanded)
    };

    let buffer = PackedBuffer {
        data,
        layout,
        mode,
        vertex_count: expanded.len(),
    };
    debug_assert_eq!(
        buffer.data.len(),
        buffer.vertex_count * layout.stride_floats()
    );
    debug!(
        "Packed {} records as {} -> {} vertices, stride {} bytes",
        records.len(),
        mode,
        buffer.vertex_count,
        layout.stride_bytes()
    );
    Ok(buffer)
}

fn interleave<V>(records: &[VertexRecord]) -> Vec<f32>
where
    V: bytemuck::Pod + for<'a> From<&'a VertexRecord>,
{
    let vertices: Vec<V> = records
        .iter()
        .map(|r| <V as From<&VertexRecord>>::from(r))
        .collect();
    bytemuck::cast_slice(&vertices).to_vec()
}
