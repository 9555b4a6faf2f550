//! Built-in decoders for the standard store value encodings.
//!
//! Numeric decoders expect the exact big-endian fixed-width encoding the
//! store's byte utilities write; any other length is a [`DecodeError::Length`].

use cellmap_model::Value;

use crate::Decoder;
use crate::error::{DecodeError, Result};

fn fixed<const N: usize>(input: &[u8], type_name: &'static str) -> Result<[u8; N]> {
    input.try_into().map_err(|_| DecodeError::Length {
        type_name,
        expected: N,
        actual: input.len(),
    })
}

/// Pass-through: exactly one output identical to the input bytes, for all
/// inputs including the empty sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughDecoder;

impl Decoder for PassThroughDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<Value>> {
        Ok(vec![Value::Bytes(input.to_vec())])
    }
}

/// UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Decoder;

impl Decoder for Utf8Decoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<Value>> {
        let text = std::str::from_utf8(input).map_err(|source| DecodeError::Utf8 { source })?;
        Ok(vec![Value::Text(text.to_owned())])
    }
}

/// Big-endian `i16`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortDecoder;

impl Decoder for ShortDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<Value>> {
        Ok(vec![Value::Short(i16::from_be_bytes(fixed(
            input, "short",
        )?))])
    }
}

/// Big-endian `i32`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntDecoder;

impl Decoder for IntDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<Value>> {
        Ok(vec![Value::Int(i32::from_be_bytes(fixed(input, "int")?))])
    }
}

/// Big-endian `i64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongDecoder;

impl Decoder for LongDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<Value>> {
        Ok(vec![Value::Long(i64::from_be_bytes(fixed(input, "long")?))])
    }
}

/// Big-endian `f32`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatDecoder;

impl Decoder for FloatDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<Value>> {
        Ok(vec![Value::Float(f32::from_be_bytes(fixed(
            input, "float",
        )?))])
    }
}

/// Big-endian `f64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleDecoder;

impl Decoder for DoubleDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<Value>> {
        Ok(vec![Value::Double(f64::from_be_bytes(fixed(
            input, "double",
        )?))])
    }
}

/// Single byte: `0` is false, anything else is true.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanDecoder;

impl Decoder for BooleanDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<Value>> {
        let [byte] = fixed(input, "boolean")?;
        Ok(vec![Value::Bool(byte != 0)])
    }
}
