//! Engine orchestration: ordered rule application per record.

use cellmap_decode::DecoderRegistry;
use cellmap_model::Record;

use crate::config::MappingConfig;
use crate::error::{ApplyError, ConfigError};
use crate::rule::MappingRule;
use crate::sink::ExtractorSink;

/// An ordered list of compiled mapping rules.
///
/// Compiled once from configuration and immutable afterward; a single engine
/// may be invoked concurrently from multiple threads processing different
/// records, since no rule carries mutable per-invocation state.
pub struct MappingEngine {
    rules: Vec<MappingRule>,
}

impl MappingEngine {
    /// Compile every configured mapping, in declared order.
    ///
    /// The first invalid entry aborts compilation; no row processing can
    /// start against a partially valid configuration. When `sink` is given,
    /// each compiled rule's extractor is registered with it.
    pub fn compile(
        config: &MappingConfig,
        registry: &DecoderRegistry,
        sink: Option<&dyn ExtractorSink>,
    ) -> Result<Self, ConfigError> {
        let mut rules = Vec::with_capacity(config.mappings.len());
        for spec in &config.mappings {
            rules.push(MappingRule::compile(spec, registry, sink)?);
        }
        tracing::debug!(rules = rules.len(), "compiled mapping engine");
        Ok(Self { rules })
    }

    /// Map the record's attached row into derived fields.
    ///
    /// Takes the row out of the record and strips the carried-over marker
    /// fields, so the raw row is replaced by derived fields rather than
    /// duplicated alongside them. A record without an attached row fails with
    /// [`ApplyError::MissingRow`].
    pub fn apply(&self, record: &mut Record) -> Result<(), ApplyError> {
        let row = record.take_row().ok_or(ApplyError::MissingRow)?;
        record.strip_marker_fields();

        for rule in &self.rules {
            rule.apply(&row, record)?;
        }
        Ok(())
    }

    /// The compiled rules, in declared order.
    #[must_use]
    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
