//! Compiled mapping rules.
//!
//! A [`MappingRule`] pairs a column target with an output target, a resolved
//! decoder, and an empty-value policy. All configuration validation happens
//! in [`MappingRule::compile`]; applying a rule to a row can only fail on the
//! internal alignment invariant of dynamic-field mode.

use std::sync::Arc;

use cellmap_decode::{Decoder, DecoderRegistry};
use cellmap_model::{Record, Row, Value};

use crate::config::{MappingSpec, ValueSource};
use crate::error::{ApplyError, ConfigError};
use crate::extract::{
    CellExtractor, PrefixCellExtractor, PrefixQualifierExtractor, SingleCellExtractor, prefix_scan,
};
use crate::sink::ExtractorSink;
use crate::target::{ColumnTarget, OutputTarget};

/// One immutable, compiled mapping rule.
///
/// Rules are constructed once from configuration and shared freely across
/// threads; applying a rule carries no per-invocation state.
pub struct MappingRule {
    input_column: String,
    output: OutputTarget,
    decoder: Arc<dyn Decoder>,
    decoder_type: String,
    source: ValueSource,
    extractor: Arc<dyn CellExtractor>,
    allow_empty: bool,
}

impl std::fmt::Debug for MappingRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingRule")
            .field("input_column", &self.input_column)
            .field("output", &self.output)
            .field("decoder_type", &self.decoder_type)
            .field("source", &self.source)
            .field("allow_empty", &self.allow_empty)
            .finish_non_exhaustive()
    }
}

impl MappingRule {
    /// Validate one configuration entry and compile it.
    ///
    /// When `sink` is given, the constructed extractor is registered with it;
    /// that is the only side effect of compilation.
    pub fn compile(
        spec: &MappingSpec,
        registry: &DecoderRegistry,
        sink: Option<&dyn ExtractorSink>,
    ) -> Result<Self, ConfigError> {
        let column = ColumnTarget::parse(&spec.input_column)?;
        let output = derive_output(spec, &column)?;

        let decoder =
            registry
                .resolve(&spec.decoder_type)
                .ok_or_else(|| ConfigError::UnknownDecoder {
                    column: spec.input_column.clone(),
                    type_name: spec.decoder_type.clone(),
                })?;

        let extractor: Arc<dyn CellExtractor> = match (spec.source, column.is_wildcard()) {
            (ValueSource::Value, false) => Arc::new(SingleCellExtractor::new(column)),
            (ValueSource::Value, true) => Arc::new(PrefixCellExtractor::new(column)),
            (ValueSource::Qualifier, true) => Arc::new(PrefixQualifierExtractor::new(column)),
            (ValueSource::Qualifier, false) => {
                return Err(ConfigError::QualifierSourceRequiresWildcard {
                    column: spec.input_column.clone(),
                });
            }
        };

        if let Some(sink) = sink {
            sink.register(Arc::clone(&extractor));
        }

        Ok(Self {
            input_column: spec.input_column.clone(),
            output,
            decoder,
            decoder_type: spec.decoder_type.clone(),
            source: spec.source,
            extractor,
            allow_empty: spec.is_allow_empty,
        })
    }

    /// Apply this rule to `row`, writing decoded values into `record`.
    pub fn apply(&self, row: &Row, record: &mut Record) -> Result<(), ApplyError> {
        match &self.output {
            OutputTarget::Single(name) => {
                self.apply_single(name, row, record);
                Ok(())
            }
            OutputTarget::Positional(names) => {
                self.apply_positional(names, row, record);
                Ok(())
            }
            OutputTarget::Dynamic(prefix) => self.apply_dynamic(prefix, row, record),
        }
    }

    /// The configured column expression.
    #[must_use]
    pub fn input_column(&self) -> &str {
        &self.input_column
    }

    #[must_use]
    pub fn column(&self) -> &ColumnTarget {
        self.extractor.column()
    }

    #[must_use]
    pub fn output(&self) -> &OutputTarget {
        &self.output
    }

    #[must_use]
    pub fn decoder_type(&self) -> &str {
        &self.decoder_type
    }

    #[must_use]
    pub fn source(&self) -> ValueSource {
        self.source
    }

    #[must_use]
    pub fn allow_empty(&self) -> bool {
        self.allow_empty
    }

    fn apply_single(&self, name: &str, row: &Row, record: &mut Record) {
        for raw in self.extractor.extract(row) {
            for value in self.decode(raw) {
                if self.accept(&value) {
                    record.put(name, value);
                }
            }
        }
    }

    fn apply_positional(&self, names: &[String], row: &Row, record: &mut Record) {
        // Zipping stops at the shorter side: surplus matched values and
        // surplus names are both dropped without diagnostic.
        for (name, raw) in names.iter().zip(self.extractor.extract(row)) {
            let values = self.decode(raw);
            // An empty name consumes its position: decoded, never written.
            if name.is_empty() {
                continue;
            }
            for value in values {
                if self.accept(&value) {
                    record.put(name.as_str(), value);
                }
            }
        }
    }

    fn apply_dynamic(
        &self,
        prefix: &str,
        row: &Row,
        record: &mut Record,
    ) -> Result<(), ApplyError> {
        let column = self.extractor.column();
        let mut values = self.extractor.extract(row);
        let mut qualifiers =
            prefix_scan(row, column.family(), column.qualifier()).map(|(qualifier, _)| qualifier);

        loop {
            match (values.next(), qualifiers.next()) {
                (Some(raw), Some(qualifier)) => {
                    let tail = &qualifier[column.qualifier().len()..];
                    let field = format!("{prefix}{}", String::from_utf8_lossy(tail));
                    for value in self.decode(raw) {
                        if self.accept(&value) {
                            record.put(field.as_str(), value);
                        }
                    }
                }
                (None, None) => break,
                // Both iterations walk the same sorted qualifier range, so a
                // length mismatch means the extractor and the row disagree.
                _ => {
                    return Err(ApplyError::QualifierAlignment {
                        column: self.input_column.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn decode(&self, raw: &[u8]) -> Vec<Value> {
        match self.decoder.decode(raw) {
            Ok(values) => values,
            Err(error) => {
                tracing::warn!(
                    column = %self.input_column,
                    decoder = %self.decoder_type,
                    %error,
                    "failed to decode cell value; skipping"
                );
                Vec::new()
            }
        }
    }

    fn accept(&self, value: &Value) -> bool {
        if !self.allow_empty && value.is_blank() {
            tracing::debug!(
                column = %self.input_column,
                "dropping blank value under strict empty policy"
            );
            return false;
        }
        true
    }
}

fn derive_output(spec: &MappingSpec, column: &ColumnTarget) -> Result<OutputTarget, ConfigError> {
    match (&spec.output_field, &spec.output_fields) {
        (None, None) => Err(ConfigError::MissingOutput {
            column: spec.input_column.clone(),
        }),
        (Some(_), Some(_)) => Err(ConfigError::ConflictingOutput {
            column: spec.input_column.clone(),
        }),
        (None, Some(names)) => Ok(OutputTarget::Positional(names.clone())),
        (Some(name), None) => match name.strip_suffix('*') {
            Some(prefix) => {
                if !column.is_wildcard() {
                    return Err(ConfigError::DynamicRequiresWildcard {
                        column: spec.input_column.clone(),
                        field: prefix.to_string(),
                    });
                }
                Ok(OutputTarget::Dynamic(prefix.to_string()))
            }
            None => Ok(OutputTarget::Single(name.clone())),
        },
    }
}
