//! Interleaved vertex layouts.
//!
//! Byte map of the widest layout (floats, 4 bytes each):
//!
//! ```text
//!  position      normal        color         texCoord  quadOffset
//!  0 ........ 16 ........ 32 ........ 48 .... 56 ........ 72
//! ```
//!
//! Narrower layouts are prefixes of this one. The packer and the attribute binder both
//! read offsets and stride from here, so they cannot drift apart.

use crate::types::{PointVertex, SurfelVertex, TexturedPointVertex};
use std::mem::size_of;

const FLOAT_BYTES: usize = size_of::<f32>();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Position,
    Normal,
    Color,
    TexCoord,
    QuadOffset,
}

/// One attribute inside an interleaved record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub kind: AttributeKind,
    /// Shader input the attribute feeds.
    pub name: &'static str,
    pub components: usize,
    pub offset_bytes: usize,
}

impl Attribute {
    pub const fn size_bytes(&self) -> usize {
        self.components * FLOAT_BYTES
    }

    pub const fn offset_floats(&self) -> usize {
        self.offset_bytes / FLOAT_BYTES
    }
}

pub const POSITION: Attribute = Attribute {
    kind: AttributeKind::Position,
    name: "vPosition",
    components: 4,
    offset_bytes: 0,
};

pub const NORMAL: Attribute = Attribute {
    kind: AttributeKind::Normal,
    name: "vNormal",
    components: 4,
    offset_bytes: 16,
};

pub const COLOR: Attribute = Attribute {
    kind: AttributeKind::Color,
    name: "vColor",
    components: 4,
    offset_bytes: 32,
};

pub const TEX_COORD: Attribute = Attribute {
    kind: AttributeKind::TexCoord,
    name: "texCoord",
    components: 2,
    offset_bytes: 48,
};

pub const QUAD_OFFSET: Attribute = Attribute {
    kind: AttributeKind::QuadOffset,
    name: "vSquare",
    components: 4,
    offset_bytes: 56,
};

/// Ordered attribute set plus the per-vertex stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: &'static [Attribute],
    stride_bytes: usize,
}

impl VertexLayout {
    /// Position, normal, color.
    pub const POINT: Self = Self::new(&[POSITION, NORMAL, COLOR]);
    /// [`Self::POINT`] plus a texture coordinate.
    pub const POINT_TEXTURED: Self = Self::new(&[POSITION, NORMAL, COLOR, TEX_COORD]);
    /// Every attribute; required for surfel packing.
    pub const SURFEL: Self = Self::new(&[POSITION, NORMAL, COLOR, TEX_COORD, QUAD_OFFSET]);

    /// Stride is the sum of the attribute widths.
    const fn new(attributes: &'static [Attribute]) -> Self {
        let mut stride_bytes = 0;
        let mut i = 0;
        while i < attributes.len() {
            stride_bytes += attributes[i].size_bytes();
            i += 1;
        }
        Self {
            attributes,
            stride_bytes,
        }
    }

    pub fn attributes(&self) -> &'static [Attribute] {
        self.attributes
    }

    pub fn stride_bytes(&self) -> usize {
        self.stride_bytes
    }

    pub fn stride_floats(&self) -> usize {
        self.stride_bytes / FLOAT_BYTES
    }

    pub fn attribute(&self, kind: AttributeKind) -> Option<&'static Attribute> {
        self.attributes.iter().find(|a| a.kind == kind)
    }

    pub fn has(&self, kind: AttributeKind) -> bool {
        self.attribute(kind).is_some()
    }
}

const _: () = assert!(VertexLayout::POINT.stride_bytes == size_of::<PointVertex>());
const _: () =
    assert!(VertexLayout::POINT_TEXTURED.stride_bytes == size_of::<TexturedPointVertex>());
const _: () = assert!(VertexLayout::SURFEL.stride_bytes == size_of::<SurfelVertex>());
