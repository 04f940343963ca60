//! Whitespace tokenizer shared by both ingest formats.

use crate::FormatError;
use std::str::FromStr;

/// Ordered whitespace-delimited tokens of a dataset, with typed positional reads.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    tokens: Vec<&'a str>,
}

impl<'a> Tokens<'a> {
    /// Split `input` on runs of whitespace. Leading and trailing whitespace yields no tokens.
    pub fn new(input: &'a str) -> Self {
        Self {
            tokens: input.split_whitespace().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Fail with [`FormatError::Truncated`] unless at least `expected` tokens are present.
    pub fn require(&self, expected: usize) -> Result<(), FormatError> {
        if self.tokens.len() < expected {
            return Err(FormatError::Truncated {
                expected,
                found: self.tokens.len(),
            });
        }
        Ok(())
    }

    /// Finite float. `inf` and `nan` spellings parse but are rejected.
    pub fn f32(&self, index: usize) -> Result<f32, FormatError> {
        let value: f32 = self.parse(index, "float")?;
        if !value.is_finite() {
            return Err(FormatError::InvalidNumber {
                index,
                token: self.tokens[index].to_string(),
                expected: "finite float",
            });
        }
        Ok(value)
    }

    pub fn u32(&self, index: usize) -> Result<u32, FormatError> {
        self.parse(index, "unsigned integer")
    }

    pub fn usize(&self, index: usize) -> Result<usize, FormatError> {
        self.parse(index, "count")
    }

    fn parse<T: FromStr>(&self, index: usize, expected: &'static str) -> Result<T, FormatError> {
        let token = self.tokens.get(index).ok_or(FormatError::Truncated {
            expected: index + 1,
            found: self.tokens.len(),
        })?;
        token.parse().map_err(|_| FormatError::InvalidNumber {
            index,
            token: (*token).to_string(),
            expected,
        })
    }
}
