//! Declarative filter specifications and their application.

use super::age::derive_age_groups;
use crate::models::{columns, Dataset, FieldValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Accepted-value predicate for a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// Finite set membership. An empty set means "no constraint",
    /// never "accept nothing".
    OneOf(Vec<String>),
    /// Two-sided inclusive integer bounds.
    Range { min: i64, max: i64 },
}

impl Constraint {
    pub fn is_unconstrained(&self) -> bool {
        matches!(self, Constraint::OneOf(values) if values.is_empty())
    }

    /// Whether the value satisfies this constraint. An `Unknown` value
    /// can never pass a positive membership test, and out-of-range or
    /// non-integer values fail range constraints.
    pub fn accepts(&self, value: &FieldValue) -> bool {
        match self {
            Constraint::OneOf(accepted) => match value {
                FieldValue::Unknown => false,
                other => {
                    let label = other.group_label();
                    accepted.iter().any(|v| *v == label)
                }
            },
            Constraint::Range { min, max } => match value.as_int() {
                Some(n) => n >= *min && n <= *max,
                None => false,
            },
        }
    }
}

/// Mapping from field name to accepted-value predicate. Fields without
/// an entry are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    constraints: HashMap<String, Constraint>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_one_of(
        mut self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.constraints.insert(
            field.into(),
            Constraint::OneOf(values.into_iter().map(Into::into).collect()),
        );
        self
    }

    pub fn with_range(mut self, field: impl Into<String>, min: i64, max: i64) -> Self {
        self.constraints
            .insert(field.into(), Constraint::Range { min, max });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.constraints
            .values()
            .all(Constraint::is_unconstrained)
    }

    /// Whether the spec carries a non-empty constraint for the field.
    pub fn targets(&self, field: &str) -> bool {
        self.constraints
            .get(field)
            .is_some_and(|c| !c.is_unconstrained())
    }

    pub fn constraints(&self) -> impl Iterator<Item = (&str, &Constraint)> {
        self.constraints.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Apply a conjunction of per-field predicates, returning a new dataset.
///
/// Constraints on fields absent from the schema are no-ops, which keeps
/// the pipeline robust to schema drift between the two surveys. The
/// derived age-group column is computed before filtering when the spec
/// targets it.
pub fn apply(dataset: &Dataset, spec: &FilterSpec) -> Dataset {
    let source = if spec.targets(columns::AGE_GROUP)
        && !dataset.has_column(columns::AGE_GROUP)
        && dataset.has_column(columns::AGE)
    {
        derive_age_groups(dataset)
    } else {
        dataset.clone()
    };

    let active: Vec<(&str, &Constraint)> = spec
        .constraints()
        .filter(|(field, constraint)| {
            !constraint.is_unconstrained() && source.has_column(field)
        })
        .collect();

    if active.is_empty() {
        return source;
    }

    source.retain(|record| {
        active
            .iter()
            .all(|(field, constraint)| constraint.accepts(record.value(field)))
    })
}
