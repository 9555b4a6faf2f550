//! Declarative mapping from wide-column rows to flat indexable records.
//!
//! A [`MappingEngine`] is compiled once from a [`MappingConfig`]: each entry
//! names a column (exact, or by qualifier prefix), an output target (a single
//! field, a positional field list, or dynamically synthesized names), a
//! decoder type, and an empty-value policy. All validation happens at compile
//! time; applying the engine to a record is a synchronous, in-memory
//! transformation with no I/O.
//!
//! ```
//! use cellmap_decode::DecoderRegistry;
//! use cellmap_engine::{MappingConfig, MappingEngine};
//! use cellmap_model::{Record, Row};
//!
//! let config: MappingConfig = serde_json::from_str(
//!     r#"{"mappings": [{"inputColumn": "info:name", "outputField": "name", "type": "string"}]}"#,
//! )
//! .unwrap();
//! let engine = MappingEngine::compile(&config, &DecoderRegistry::default(), None).unwrap();
//!
//! let row = Row::builder().cell("info", "name", "alice").build();
//! let mut record = Record::with_row(row);
//! engine.apply(&mut record).unwrap();
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod rule;
pub mod sink;
pub mod target;

pub use config::{MappingConfig, MappingSpec, ValueSource};
pub use engine::MappingEngine;
pub use error::{ApplyError, ConfigError};
pub use extract::{CellExtractor, PrefixCellExtractor, PrefixQualifierExtractor, SingleCellExtractor};
pub use rule::MappingRule;
pub use sink::{ExtractorSink, SharedExtractorList};
pub use target::{ColumnTarget, OutputTarget};
