//! Error types for the viewer.

use std::path::PathBuf;
use surfel_data::FormatError;
use surfel_gpu::{GpuError, PackError};
use thiserror::Error;

/// Errors raised while fetching dataset text.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("dataset file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while loading, rebuilding or drawing.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("malformed dataset: {0}")]
    Format(#[from] FormatError),

    #[error("packing error: {0}")]
    Pack(#[from] PackError),

    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),

    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("unknown dataset {0:?}")]
    UnknownDataset(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
