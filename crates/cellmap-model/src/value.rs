//! Typed values produced by cell decoders.

use serde::{Deserialize, Serialize};

/// One decoded output value.
///
/// Decoders turn raw cell bytes into zero or more of these; the record
/// accumulates them under output field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Value {
    /// Raw bytes, passed through unconverted.
    Bytes(Vec<u8>),
    /// UTF-8 text.
    Text(String),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
}

impl Value {
    /// True for values the strict empty policy drops: text that trims to
    /// empty, and zero-length byte payloads. Numeric and boolean values are
    /// never blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Bytes(bytes) => bytes.is_empty(),
            _ => false,
        }
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}
