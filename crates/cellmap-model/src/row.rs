//! Sorted row model: family → qualifier → raw cell value.

use std::collections::BTreeMap;

/// Qualifier → value map for one column family, ordered by byte-lexicographic
/// qualifier comparison.
pub type FamilyMap = BTreeMap<Vec<u8>, Vec<u8>>;

/// One stored record from a wide-column store.
///
/// A row maps (column family, qualifier) to a raw byte value. Qualifiers
/// within a family are totally ordered by byte comparison, which is what the
/// prefix extractors rely on for bounded tail scans. Rows are built once via
/// [`RowBuilder`] and never mutated by the mapping engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    families: BTreeMap<Vec<u8>, FamilyMap>,
}

impl Row {
    /// Start building a row.
    #[must_use]
    pub fn builder() -> RowBuilder {
        RowBuilder::default()
    }

    /// The sorted qualifier map for `family`, if the row has any cell in it.
    #[must_use]
    pub fn family(&self, family: &[u8]) -> Option<&FamilyMap> {
        self.families.get(family)
    }

    /// The raw value at `(family, qualifier)`, if present.
    #[must_use]
    pub fn value(&self, family: &[u8], qualifier: &[u8]) -> Option<&[u8]> {
        self.families
            .get(family)
            .and_then(|qualifiers| qualifiers.get(qualifier))
            .map(Vec::as_slice)
    }

    /// Iterate families in sorted order.
    pub fn families(&self) -> impl Iterator<Item = (&[u8], &FamilyMap)> {
        self.families
            .iter()
            .map(|(family, qualifiers)| (family.as_slice(), qualifiers))
    }

    /// Total number of cells across all families.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.families.values().map(BTreeMap::len).sum()
    }

    /// True when the row holds no cells at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

/// Builder for [`Row`].
#[derive(Debug, Clone, Default)]
pub struct RowBuilder {
    families: BTreeMap<Vec<u8>, FamilyMap>,
}

impl RowBuilder {
    /// Add one cell. A later cell for the same (family, qualifier) replaces
    /// the earlier value, matching how a store returns at most one visible
    /// version per column.
    #[must_use]
    pub fn cell(
        mut self,
        family: impl Into<Vec<u8>>,
        qualifier: impl Into<Vec<u8>>,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        self.families
            .entry(family.into())
            .or_default()
            .insert(qualifier.into(), value.into());
        self
    }

    #[must_use]
    pub fn build(self) -> Row {
        Row {
            families: self.families,
        }
    }
}
