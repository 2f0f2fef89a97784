//! Composite index builder.
//!
//! A composite index combines several per-group rate aggregations with
//! signed weights (positive for protective factors such as
//! treatment-seeking, negative for adverse factors such as frequent
//! work interference) and clips the sum once into a fixed display
//! range. Weights are data, not constants.

use super::aggregate::{rate_of_any, AggregationResult};
use super::Computation;
use crate::models::{columns, Dataset, GroupKey};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// One weighted component of an index formula. The component's rate is
/// the fraction of a group whose `field` value is in `matching`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexComponent {
    pub name: String,
    pub field: String,
    pub matching: Vec<String>,
    pub weight: f64,
}

/// Linear combination with a display range. Clipping happens once,
/// after summation, never per component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexFormula {
    pub components: Vec<IndexComponent>,
    pub floor: f64,
    pub ceiling: f64,
}

impl IndexFormula {
    /// Per-country mental health index: treatment-seeking is
    /// protective, frequent work interference and fear of consequences
    /// are adverse.
    pub fn mental_health_default() -> Self {
        Self {
            components: vec![
                IndexComponent {
                    name: "treatment".to_string(),
                    field: columns::TREATMENT.to_string(),
                    matching: vec!["Yes".to_string()],
                    weight: 10.0,
                },
                IndexComponent {
                    name: "work_interference".to_string(),
                    field: columns::WORK_INTERFERE.to_string(),
                    matching: vec!["Often".to_string(), "Sometimes".to_string()],
                    weight: -5.0,
                },
                IndexComponent {
                    name: "consequence_fear".to_string(),
                    field: columns::MENTAL_HEALTH_CONSEQUENCE.to_string(),
                    matching: vec!["Yes".to_string()],
                    weight: -5.0,
                },
            ],
            floor: 0.0,
            ceiling: 10.0,
        }
    }

    /// Secondary single-component score: rate of `target` scaled by 10.
    /// Support and awareness scores use this shape; they are never
    /// folded into the primary index.
    pub fn single_rate(name: &str, field: &str, target: &str) -> Self {
        Self {
            components: vec![IndexComponent {
                name: name.to_string(),
                field: field.to_string(),
                matching: vec![target.to_string()],
                weight: 10.0,
            }],
            floor: 0.0,
            ceiling: 10.0,
        }
    }
}

/// Per-group score with a completeness count: how many of the
/// formula's components had their column available. Groups with a
/// partial component set keep their partial sum rather than being
/// discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexScore {
    pub value: f64,
    pub components_present: usize,
}

/// Bounded per-group scores, groups in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeIndex {
    pub component_total: usize,
    groups: Vec<(GroupKey, IndexScore)>,
}

impl CompositeIndex {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(GroupKey, IndexScore)> {
        self.groups.iter()
    }

    pub fn get(&self, key: &GroupKey) -> Option<&IndexScore> {
        self.groups.iter().find(|(k, _)| k == key).map(|(_, s)| s)
    }
}

/// Combine already-computed component rate aggregations (percentages
/// in [0, 100]) into a composite index.
pub fn combine(
    components: &[(&IndexComponent, AggregationResult)],
    component_total: usize,
    floor: f64,
    ceiling: f64,
) -> CompositeIndex {
    let mut order: Vec<GroupKey> = Vec::new();
    let mut sums: HashMap<GroupKey, (f64, usize)> = HashMap::new();

    for (component, rates) in components {
        for (key, stats) in rates.iter() {
            let Some(rate_pct) = stats.value else { continue };
            let entry = sums.entry(key.clone()).or_insert_with(|| {
                order.push(key.clone());
                (0.0, 0)
            });
            entry.0 += component.weight * (rate_pct / 100.0);
            entry.1 += 1;
        }
    }

    let groups = order
        .into_iter()
        .map(|key| {
            let (sum, present) = sums[&key];
            let score = IndexScore {
                value: sum.clamp(floor, ceiling),
                components_present: present,
            };
            (key, score)
        })
        .collect();

    CompositeIndex {
        component_total,
        groups,
    }
}

/// Build a composite index over one grouping field.
///
/// Components whose column is absent from the schema are skipped (the
/// per-group completeness count reflects this); when every component
/// is absent the result is `Unavailable`.
pub fn build_index(
    dataset: &Dataset,
    group_field: &str,
    formula: &IndexFormula,
) -> Computation<CompositeIndex> {
    if !dataset.has_column(group_field) && !dataset.is_empty() {
        return Computation::Unavailable {
            missing: vec![group_field.to_string()],
        };
    }

    let mut available: Vec<(&IndexComponent, AggregationResult)> = Vec::new();
    let mut missing: Vec<String> = Vec::new();

    for component in &formula.components {
        if !dataset.has_column(&component.field) {
            missing.push(component.field.clone());
            continue;
        }
        let targets: Vec<&str> = component.matching.iter().map(String::as_str).collect();
        if let Computation::Computed(rates) =
            rate_of_any(dataset, &[group_field], &component.field, &targets)
        {
            available.push((component, rates));
        }
    }

    if available.is_empty() && !formula.components.is_empty() {
        return Computation::Unavailable { missing };
    }

    Computation::Computed(combine(
        &available,
        formula.components.len(),
        formula.floor,
        formula.ceiling,
    ))
}

/// Deterministic placeholder index for demo deployments where the
/// component columns are not loaded. Values are seeded by the group
/// label so repeated requests and tests see the same table. Only ever
/// surfaced behind the `DemoFallback` tag.
pub fn demo_index(formula: &IndexFormula) -> CompositeIndex {
    const DEMO_GROUPS: [&str; 10] = [
        "United States",
        "United Kingdom",
        "Canada",
        "Germany",
        "Australia",
        "India",
        "France",
        "Netherlands",
        "Brazil",
        "Sweden",
    ];

    let span = (formula.ceiling - formula.floor).max(0.0);
    let low = formula.floor + span * 0.3;
    let high = formula.floor + span * 0.8;
    let groups = DEMO_GROUPS
        .iter()
        .map(|label| {
            let mut hasher = DefaultHasher::new();
            label.hash(&mut hasher);
            let unit = (hasher.finish() % 1000) as f64 / 1000.0;
            let value = ((low + unit * (high - low)) * 100.0).round() / 100.0;
            (
                GroupKey::single(*label),
                IndexScore {
                    value,
                    components_present: 0,
                },
            )
        })
        .collect();

    CompositeIndex {
        component_total: formula.components.len(),
        groups,
    }
}

/// Index build that substitutes the deterministic demo table when the
/// real computation is unavailable and demo fallback is enabled.
pub fn build_index_with_fallback(
    dataset: &Dataset,
    group_field: &str,
    formula: &IndexFormula,
    demo_fallback: bool,
) -> Computation<CompositeIndex> {
    match build_index(dataset, group_field, formula) {
        Computation::Unavailable { missing } if demo_fallback => {
            tracing::debug!(missing = ?missing, "composite index unavailable, serving demo fallback");
            Computation::DemoFallback(demo_index(formula))
        }
        other => other,
    }
}
