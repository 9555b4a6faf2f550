//! Column and output target representations.

use std::fmt;

use crate::error::ConfigError;

/// Parsed column locator: family, qualifier (or qualifier prefix), and a
/// wildcard flag.
///
/// Without the wildcard the qualifier is an exact match; with it, the target
/// matches every qualifier in the family starting with the prefix, in sorted
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTarget {
    family: Vec<u8>,
    qualifier: Vec<u8>,
    wildcard: bool,
}

impl ColumnTarget {
    /// Parse a `family:qualifier` expression, with a trailing `*` marking a
    /// qualifier-prefix wildcard. The split is on the first `:`, so
    /// qualifiers may themselves contain colons.
    pub fn parse(expression: &str) -> Result<Self, ConfigError> {
        let (family, qualifier) =
            expression
                .split_once(':')
                .ok_or_else(|| ConfigError::MalformedColumn {
                    expression: expression.to_string(),
                })?;

        let (qualifier, wildcard) = match qualifier.strip_suffix('*') {
            Some(prefix) => (prefix, true),
            None => (qualifier, false),
        };

        Ok(Self {
            family: family.as_bytes().to_vec(),
            qualifier: qualifier.as_bytes().to_vec(),
            wildcard,
        })
    }

    #[must_use]
    pub fn family(&self) -> &[u8] {
        &self.family
    }

    /// The exact qualifier, or the prefix when [`is_wildcard`](Self::is_wildcard).
    #[must_use]
    pub fn qualifier(&self) -> &[u8] {
        &self.qualifier
    }

    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }
}

impl fmt::Display for ColumnTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}{}",
            String::from_utf8_lossy(&self.family),
            String::from_utf8_lossy(&self.qualifier),
            if self.wildcard { "*" } else { "" }
        )
    }
}

/// Where a rule writes its decoded values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// All values accumulate under one field name.
    Single(String),
    /// Values are zipped against this name list by position; an empty name
    /// discards the value at that position.
    Positional(Vec<String>),
    /// Field names are synthesized per matched qualifier: this prefix plus
    /// the qualifier's tail after the column prefix. Requires a wildcard
    /// column target.
    Dynamic(String),
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(name) => f.write_str(name),
            Self::Positional(names) => write!(f, "[{}]", names.join(", ")),
            Self::Dynamic(prefix) => write!(f, "{prefix}*"),
        }
    }
}
