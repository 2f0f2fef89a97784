//! Derived age-group column.

use crate::models::{columns, Dataset, FieldValue, Record};

/// Fixed ordered age buckets. Every possible age lands in exactly one
/// bucket; missing or unparsable ages land in `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBucket {
    Under25,
    From25To34,
    From35To44,
    From45To54,
    Over54,
    Unknown,
}

impl AgeBucket {
    /// Display order of the known buckets.
    pub const ORDERED: [AgeBucket; 5] = [
        AgeBucket::Under25,
        AgeBucket::From25To34,
        AgeBucket::From35To44,
        AgeBucket::From45To54,
        AgeBucket::Over54,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AgeBucket::Under25 => "Under 25",
            AgeBucket::From25To34 => "25-34",
            AgeBucket::From35To44 => "35-44",
            AgeBucket::From45To54 => "45-54",
            AgeBucket::Over54 => "55+",
            AgeBucket::Unknown => "Unknown",
        }
    }

    pub fn from_age(age: i64) -> Self {
        if age < 25 {
            AgeBucket::Under25
        } else if age < 35 {
            AgeBucket::From25To34
        } else if age < 45 {
            AgeBucket::From35To44
        } else if age < 55 {
            AgeBucket::From45To54
        } else {
            AgeBucket::Over54
        }
    }

    pub fn from_value(value: &FieldValue) -> Self {
        match value.as_int() {
            Some(age) => Self::from_age(age),
            None => AgeBucket::Unknown,
        }
    }
}

/// Attach the derived `age_group` column to every record.
pub fn derive_age_groups(dataset: &Dataset) -> Dataset {
    dataset.map_records(|record| {
        let bucket = AgeBucket::from_value(record.value(columns::AGE));
        let mut derived: Record = record.clone();
        derived.set(columns::AGE_GROUP, FieldValue::text(bucket.label()));
        derived
    })
}
