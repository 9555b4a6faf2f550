//! Extraction strategies over sorted rows.
//!
//! Every extractor consumes a [`Row`] and its [`ColumnTarget`] and produces a
//! lazy, finite, ordered iteration of raw byte values. Each call yields a
//! fresh iterator; no iteration state is shared between calls, so a compiled
//! rule can be applied to any number of rows.
//!
//! Prefix matching exploits the sorted qualifier order: the scan starts at
//! the prefix and stops at the first qualifier that no longer starts with it,
//! since every later qualifier sorts after that one and cannot match either.

use std::ops::Bound;

use cellmap_model::Row;

use crate::target::ColumnTarget;

/// Strategy producing the ordered raw byte values matching a column target.
///
/// Extractors expose their target so collaborators that inspect which columns
/// an engine consumes (for example a store-side column-filter builder) can
/// read it off a registered extractor.
pub trait CellExtractor: Send + Sync {
    /// The column target this extractor consumes.
    fn column(&self) -> &ColumnTarget;

    /// Produce a fresh iteration over the matching raw values in `row`.
    fn extract<'r>(&'r self, row: &'r Row) -> Box<dyn Iterator<Item = &'r [u8]> + 'r>;
}

/// Bounded scan over the qualifiers in `family` starting with `prefix`, in
/// ascending byte order, yielding (qualifier, value) pairs.
pub(crate) fn prefix_scan<'r>(
    row: &'r Row,
    family: &'r [u8],
    prefix: &'r [u8],
) -> impl Iterator<Item = (&'r [u8], &'r [u8])> {
    row.family(family)
        .into_iter()
        .flat_map(move |qualifiers| {
            qualifiers
                .range::<[u8], _>((Bound::Included(prefix), Bound::Unbounded))
                .take_while(move |(qualifier, _)| qualifier.starts_with(prefix))
                .map(|(qualifier, value)| (qualifier.as_slice(), value.as_slice()))
        })
}

/// Exact-match extraction: at most one value, the cell at (family, qualifier).
#[derive(Debug, Clone)]
pub struct SingleCellExtractor {
    column: ColumnTarget,
}

impl SingleCellExtractor {
    #[must_use]
    pub fn new(column: ColumnTarget) -> Self {
        Self { column }
    }
}

impl CellExtractor for SingleCellExtractor {
    fn column(&self) -> &ColumnTarget {
        &self.column
    }

    fn extract<'r>(&'r self, row: &'r Row) -> Box<dyn Iterator<Item = &'r [u8]> + 'r> {
        Box::new(
            row.value(self.column.family(), self.column.qualifier())
                .into_iter(),
        )
    }
}

/// Wildcard extraction of cell values: every cell whose qualifier starts with
/// the prefix, in sorted qualifier order.
#[derive(Debug, Clone)]
pub struct PrefixCellExtractor {
    column: ColumnTarget,
}

impl PrefixCellExtractor {
    #[must_use]
    pub fn new(column: ColumnTarget) -> Self {
        Self { column }
    }
}

impl CellExtractor for PrefixCellExtractor {
    fn column(&self) -> &ColumnTarget {
        &self.column
    }

    fn extract<'r>(&'r self, row: &'r Row) -> Box<dyn Iterator<Item = &'r [u8]> + 'r> {
        Box::new(
            prefix_scan(row, self.column.family(), self.column.qualifier())
                .map(|(_, value)| value),
        )
    }
}

/// Wildcard extraction of the qualifier bytes themselves, in sorted order.
/// Drives dynamic field-name synthesis when the qualifier, not the cell
/// value, is the thing being indexed.
#[derive(Debug, Clone)]
pub struct PrefixQualifierExtractor {
    column: ColumnTarget,
}

impl PrefixQualifierExtractor {
    #[must_use]
    pub fn new(column: ColumnTarget) -> Self {
        Self { column }
    }
}

impl CellExtractor for PrefixQualifierExtractor {
    fn column(&self) -> &ColumnTarget {
        &self.column
    }

    fn extract<'r>(&'r self, row: &'r Row) -> Box<dyn Iterator<Item = &'r [u8]> + 'r> {
        Box::new(
            prefix_scan(row, self.column.family(), self.column.qualifier())
                .map(|(qualifier, _)| qualifier),
        )
    }
}
