//! Flat output record populated by the mapping engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::row::Row;
use crate::value::Value;

/// Reserved field names the surrounding pipeline uses to carry row metadata
/// alongside the raw row body. The engine strips these before writing derived
/// fields.
pub const MARKER_FIELDS: [&str; 3] = [
    "_attachment_mimetype",
    "_attachment_charset",
    "_attachment_name",
];

/// A named-field record suitable for indexing into a search engine.
///
/// Fields accumulate values: writing the same field twice appends, never
/// overwrites, so one field name can hold an ordered sequence of values.
/// Before mapping, a record carries the raw [`Row`] it was loaded from; the
/// engine takes the row out and replaces it with derived fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Vec<Value>>,
    #[serde(skip)]
    row: Option<Row>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A record already carrying its source row.
    #[must_use]
    pub fn with_row(row: Row) -> Self {
        Self {
            fields: BTreeMap::new(),
            row: Some(row),
        }
    }

    /// Attach the raw source row, replacing any previously attached row.
    pub fn attach_row(&mut self, row: Row) {
        self.row = Some(row);
    }

    /// Take the attached row out of the record, leaving the slot empty.
    pub fn take_row(&mut self) -> Option<Row> {
        self.row.take()
    }

    /// True while the record still carries its source row.
    #[must_use]
    pub fn has_row(&self) -> bool {
        self.row.is_some()
    }

    /// Append `value` to `field`.
    pub fn put(&mut self, field: impl Into<String>, value: Value) {
        self.fields.entry(field.into()).or_default().push(value);
    }

    /// All values written to `field`, in write order.
    #[must_use]
    pub fn get(&self, field: &str) -> &[Value] {
        self.fields.get(field).map_or(&[], Vec::as_slice)
    }

    /// The first value written to `field`.
    #[must_use]
    pub fn first(&self, field: &str) -> Option<&Value> {
        self.get(field).first()
    }

    /// Remove a field and return its values.
    pub fn remove(&mut self, field: &str) -> Vec<Value> {
        self.fields.remove(field).unwrap_or_default()
    }

    /// Drop the reserved `_attachment_*` marker fields carried over from the
    /// pipeline, so only derived fields remain after mapping.
    pub fn strip_marker_fields(&mut self) {
        for field in MARKER_FIELDS {
            self.fields.remove(field);
        }
    }

    /// Iterate fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.fields
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Number of distinct field names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_accumulates_in_write_order() {
        let mut record = Record::new();
        record.put("out", Value::Text("a".to_string()));
        record.put("out", Value::Text("b".to_string()));

        assert_eq!(
            record.get("out"),
            &[
                Value::Text("a".to_string()),
                Value::Text("b".to_string())
            ]
        );
        assert_eq!(record.first("out"), Some(&Value::Text("a".to_string())));
        assert_eq!(record.get("missing"), &[] as &[Value]);
    }

    #[test]
    fn take_row_empties_the_slot() {
        let mut record = Record::with_row(Row::builder().cell("cf", "q", "v").build());
        assert!(record.has_row());

        assert!(record.take_row().is_some());
        assert!(!record.has_row());
        assert!(record.take_row().is_none());
    }

    #[test]
    fn strip_marker_fields_keeps_ordinary_fields() {
        let mut record = Record::new();
        record.put("_attachment_mimetype", Value::Text("app/x".to_string()));
        record.put("_attachment_charset", Value::Text("utf-8".to_string()));
        record.put("id", Value::Text("row1".to_string()));

        record.strip_marker_fields();

        assert_eq!(record.len(), 1);
        assert_eq!(record.first("id"), Some(&Value::Text("row1".to_string())));
    }

    #[test]
    fn serializes_as_bare_field_map() {
        let mut record = Record::with_row(Row::builder().cell("cf", "q", "v").build());
        record.put("name", Value::Text("x".to_string()));

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"name":[{"kind":"Text","value":"x"}]}"#);
    }
}
