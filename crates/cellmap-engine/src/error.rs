//! Error types for mapping compilation and row application.

use thiserror::Error;

/// Errors raised while compiling a mapping configuration into rules.
///
/// These are permanent configuration defects: compilation fails before any
/// row is processed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Column expression did not split into `family:qualifier`.
    #[error("invalid column expression '{expression}': expected 'family:qualifier'")]
    MalformedColumn { expression: String },

    /// Neither `outputField` nor `outputFields` was configured.
    #[error("mapping for '{column}' must define either outputField or outputFields")]
    MissingOutput { column: String },

    /// Both `outputField` and `outputFields` were configured.
    #[error("mapping for '{column}' must not define both outputField and outputFields")]
    ConflictingOutput { column: String },

    /// Dynamic field naming requested on a non-wildcard column.
    #[error("dynamic output field '{field}*' requires a wildcard column, got '{column}'")]
    DynamicRequiresWildcard { column: String, field: String },

    /// Qualifier extraction requested on a non-wildcard column: with an exact
    /// qualifier there is nothing variable to extract.
    #[error("qualifier source requires a wildcard column, got '{column}'")]
    QualifierSourceRequiresWildcard { column: String },

    /// Decoder type name not present in the registry.
    #[error("unknown decoder type '{type_name}' for column '{column}'")]
    UnknownDecoder { column: String, type_name: String },
}

/// Errors raised while applying compiled rules to one record.
///
/// Both variants abort processing of the current record and propagate to the
/// caller; neither is silently swallowed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApplyError {
    /// The record carried no row to extract from.
    #[error("record has no attached row to extract from")]
    MissingRow,

    /// Value extraction and qualifier enumeration disagreed on length in
    /// dynamic-field mode. Indicates an extractor/row consistency bug.
    #[error("value and qualifier sequences diverged for column '{column}'")]
    QualifierAlignment { column: String },
}
