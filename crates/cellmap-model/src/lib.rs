//! Core data model for wide-column row mapping.
//!
//! This crate defines the three values the mapping engine moves between: the
//! sorted [`Row`] retrieved from a wide-column store, the typed [`Value`]s
//! decoders produce from raw cell bytes, and the flat [`Record`] of named
//! fields handed downstream for indexing.

#![deny(unsafe_code)]

pub mod record;
pub mod row;
pub mod value;

pub use record::{MARKER_FIELDS, Record};
pub use row::{Row, RowBuilder};
pub use value::Value;
