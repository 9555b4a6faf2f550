//! Value decoders: raw cell bytes to typed output values.
//!
//! A [`Decoder`] converts one raw byte sequence into zero or more typed
//! [`Value`]s. Decoders are looked up by type name in a [`DecoderRegistry`]
//! when mapping rules are compiled, so an unknown type name fails fast at
//! construction time, never while a row is being processed.

#![deny(unsafe_code)]

pub mod builtin;
pub mod error;
pub mod registry;

use cellmap_model::Value;

pub use error::{DecodeError, Result};
pub use registry::{DecoderRegistry, PASS_THROUGH};

/// Converts one raw cell value into zero or more typed output values.
///
/// One input may decode to a variable number of logical values (for example a
/// delimited multi-value encoding). Implementations must be stateless across
/// calls: the same input always yields the same outputs.
pub trait Decoder: Send + Sync {
    fn decode(&self, input: &[u8]) -> Result<Vec<Value>>;
}
