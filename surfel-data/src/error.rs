use thiserror::Error;

/// Errors produced while turning raw dataset text into geometry.
///
/// Any of these aborts the current load; callers keep whatever they displayed before.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("input ended after {found} tokens, expected at least {expected}")]
    Truncated { expected: usize, found: usize },

    #[error("token {index} ({token:?}) is not a valid {expected}")]
    InvalidNumber {
        index: usize,
        token: String,
        expected: &'static str,
    },

    #[error("{leftover} trailing index tokens do not form a full triangle")]
    PartialTriangle { leftover: usize },

    #[error("triangle {triangle} references vertex {index}, but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
}
