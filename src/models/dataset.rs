//! Immutable in-memory tabular dataset.

use super::record::Record;
use std::collections::BTreeSet;

/// An ordered collection of records sharing a partially overlapping
/// schema. Every transformation returns a new `Dataset` value; the
/// original is never mutated, so concurrent readers need no locking.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// A column is part of the schema when any record carries it.
    pub fn has_column(&self, field: &str) -> bool {
        self.records.iter().any(|r| r.has_field(field))
    }

    /// Union of field names across all records, sorted.
    pub fn column_names(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        for record in &self.records {
            for name in record.field_names() {
                names.insert(name.to_string());
            }
        }
        names.into_iter().collect()
    }

    /// New dataset containing only the records the predicate accepts.
    pub fn retain(&self, predicate: impl Fn(&Record) -> bool) -> Dataset {
        Dataset::new(
            self.records
                .iter()
                .filter(|r| predicate(r))
                .cloned()
                .collect(),
        )
    }

    /// New dataset with every record transformed, e.g. to attach a
    /// derived column.
    pub fn map_records(&self, transform: impl Fn(&Record) -> Record) -> Dataset {
        Dataset::new(self.records.iter().map(transform).collect())
    }

    /// All known numeric values of a column, record order preserved.
    pub fn numeric_values(&self, field: &str) -> Vec<f64> {
        self.records
            .iter()
            .filter_map(|r| r.value(field).as_f64())
            .collect()
    }
}
