//! Mapping configuration schema.
//!
//! The surrounding pipeline hands the engine one [`MappingConfig`]; each
//! [`MappingSpec`] entry is validated and compiled into a
//! [`MappingRule`](crate::rule::MappingRule) before the first row is
//! processed. Unrecognized options are rejected at deserialization time.

use cellmap_decode::PASS_THROUGH;
use serde::{Deserialize, Serialize};

/// Where a mapping extracts its values from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    /// Extract the cell values of matching columns.
    #[default]
    Value,
    /// Extract the qualifier names themselves. Only valid for wildcard
    /// columns.
    Qualifier,
}

/// One configured mapping entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MappingSpec {
    /// Column expression: `family:qualifier`, or `family:prefix*` to match
    /// every qualifier starting with `prefix`.
    pub input_column: String,

    /// Single output field name; a trailing `*` derives field names from the
    /// matched qualifiers instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_field: Option<String>,

    /// Positional output field names, zipped against matched values in
    /// qualifier order. An empty name discards the value at that position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_fields: Option<Vec<String>>,

    /// Decoder type name, resolved against the registry at compile time.
    #[serde(rename = "type", default = "default_decoder_type")]
    pub decoder_type: String,

    /// Value or qualifier extraction.
    #[serde(default)]
    pub source: ValueSource,

    /// When false, decoded values that are blank are dropped instead of
    /// written.
    #[serde(default = "default_true")]
    pub is_allow_empty: bool,
}

/// An ordered list of mapping entries; rules apply in declared order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MappingConfig {
    pub mappings: Vec<MappingSpec>,
}

fn default_decoder_type() -> String {
    PASS_THROUGH.to_string()
}

fn default_true() -> bool {
    true
}
