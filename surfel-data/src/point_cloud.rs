//! ASCII point-cloud ingestion.
//!
//! The supported dialect is the fixed-preamble ASCII PLY written by the authoring
//! tool: a 9-token header, the vertex count at token 9, a further 39 preamble tokens
//! of per-dataset metadata, then one 10-token record per point:
//! `x y z nx ny nz r g b a`. The header length is a format contract and is never
//! inferred; anything that does not line up is a parse failure.

use crate::math::{direction, point};
use crate::{FormatError, Tokens, VertexRecord};
use glam::Vec4;
use tracing::debug;

/// Tokens of opaque header that precede the vertex count.
pub const HEADER_TOKENS: usize = 9;
/// Position of the vertex count token.
pub const VERTEX_COUNT_TOKEN: usize = HEADER_TOKENS;
/// Opaque metadata tokens between the vertex count and the first record.
pub const PREAMBLE_TOKENS: usize = 39;
/// Position of the first record token.
pub const DATA_START_TOKEN: usize = VERTEX_COUNT_TOKEN + 1 + PREAMBLE_TOKENS;
/// Tokens consumed per point.
pub const RECORD_TOKENS: usize = 10;

const _: () = assert!(DATA_START_TOKEN == 49);

/// How the color tokens of a dataset are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorEncoding {
    /// Integers in `[0, 255]`, scaled to `[0, 1]` at the call site.
    #[default]
    Byte,
    /// Already normalized to `[0, 1]`.
    Unit,
}

/// One parsed point-cloud sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointRecord {
    /// Position, w = 1.
    pub position: Vec4,
    /// Normal carried from the input, w = 0.
    pub normal: Vec4,
    /// Color exactly as read, not scaled.
    pub color: Vec4,
}

impl PointRecord {
    /// Color scaled from `[0, 255]` to `[0, 1]`.
    pub fn normalized_color(&self) -> Vec4 {
        self.color / 255.0
    }

    /// Color interpreted according to `encoding`.
    pub fn color_as(&self, encoding: ColorEncoding) -> Vec4 {
        match encoding {
            ColorEncoding::Byte => self.normalized_color(),
            ColorEncoding::Unit => self.color,
        }
    }

    /// Vertex record with the position uniformly scaled about the origin.
    pub fn to_record(&self, encoding: ColorEncoding, position_scale: f32) -> VertexRecord {
        let scaled = (self.position.truncate() * position_scale).extend(1.0);
        VertexRecord::new(scaled, self.normal, self.color_as(encoding))
    }
}

/// Parse the point-cloud format.
#[tracing::instrument(skip_all, fields(bytes = input.len()))]
pub fn parse_point_cloud(input: &str) -> Result<Vec<PointRecord>, FormatError> {
    let tokens = Tokens::new(input);
    tokens.require(VERTEX_COUNT_TOKEN + 1)?;
    let count = tokens.usize(VERTEX_COUNT_TOKEN)?;

    let end = count
        .checked_mul(RECORD_TOKENS)
        .and_then(|n| n.checked_add(DATA_START_TOKEN))
        .ok_or(FormatError::Truncated {
            expected: usize::MAX,
            found: tokens.len(),
        })?;
    tokens.require(end)?;

    let mut records = Vec::with_capacity(count);
    for i in 0..count {
        let base = DATA_START_TOKEN + i * RECORD_TOKENS;
        let f = |offset: usize| tokens.f32(base + offset);
        records.push(PointRecord {
            position: point(f(0)?, f(1)?, f(2)?),
            normal: direction(f(3)?, f(4)?, f(5)?),
            color: Vec4::new(f(6)?, f(7)?, f(8)?, f(9)?),
        });
    }

    if tokens.len() > end {
        debug!("Ignoring {} tokens after the last record", tokens.len() - end);
    }
    debug!("Parsed point cloud: {} points", records.len());
    Ok(records)
}
