use crate::layout::AttributeKind;
use thiserror::Error;

/// Errors raised while packing vertex records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    #[error("layout with stride {stride} bytes has no {missing:?} attribute, required by surfel packing")]
    MissingAttribute { missing: AttributeKind, stride: usize },
}

/// Errors raised by GPU collaborators or while binding buffers to a program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GpuError {
    #[error("shader program has no attribute named {0:?}")]
    UnknownAttribute(String),

    #[error("shader program has no uniform named {0:?}")]
    UnknownUniform(String),

    #[error("binding stride {binding} bytes does not match packed stride {packed} bytes")]
    StrideMismatch { binding: usize, packed: usize },

    #[error("texture data is {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    TextureSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("upload failed: {0}")]
    Upload(String),
}
