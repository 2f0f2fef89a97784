//! Grouped statistical aggregation.

use super::Computation;
use crate::models::{Dataset, GroupKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Statistic computed per group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateOp {
    Count,
    Mean,
    Median,
    StdDev,
    /// Fraction of records in the group whose value equals the target,
    /// scaled to a percentage in [0, 100]. The denominator is the full
    /// group count, so missing values count against the rate.
    RateOf(String),
}

impl AggregateOp {
    fn needs_value_column(&self) -> bool {
        !matches!(self, AggregateOp::Count)
    }
}

/// Per-group output. `count` reflects every matching record regardless
/// of missingness in the value column; numeric statistics skip records
/// whose value is missing and are `None` when nothing remains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub count: usize,
    pub value: Option<f64>,
}

/// Grouped aggregation output. Groups appear in first-seen record
/// order; zero-count groups are never emitted. Callers sort as needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    groups: Vec<(GroupKey, GroupStats)>,
}

impl AggregationResult {
    pub fn from_groups(groups: Vec<(GroupKey, GroupStats)>) -> Self {
        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(GroupKey, GroupStats)> {
        self.groups.iter()
    }

    pub fn get(&self, key: &GroupKey) -> Option<&GroupStats> {
        self.groups.iter().find(|(k, _)| k == key).map(|(_, s)| s)
    }

    pub fn total_count(&self) -> usize {
        self.groups.iter().map(|(_, s)| s.count).sum()
    }

    /// Up to `n` groups with the largest values. Groups without a value
    /// are skipped; ties keep first-seen order (stable sort).
    pub fn top_n(&self, n: usize) -> Vec<(&GroupKey, f64)> {
        let mut ranked = self.ranked();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(n);
        ranked
    }

    /// Up to `n` groups with the smallest values, same tie rules.
    pub fn bottom_n(&self, n: usize) -> Vec<(&GroupKey, f64)> {
        let mut ranked = self.ranked();
        ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(n);
        ranked
    }

    fn ranked(&self) -> Vec<(&GroupKey, f64)> {
        self.groups
            .iter()
            .filter_map(|(key, stats)| stats.value.map(|v| (key, v)))
            .collect()
    }
}

/// Full summary row for one group, the shape rendered as a comparison
/// table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub key: GroupKey,
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Sample standard deviation; needs at least two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(var.sqrt())
}

/// Sample variance; needs at least two values.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    sample_std(values).map(|s| s * s)
}

struct GroupAccumulator {
    count: usize,
    numeric: Vec<f64>,
    matching: usize,
}

/// Compute one statistic per group.
///
/// `group_fields` holds zero, one, or two field names; with none, the
/// whole dataset forms a single "All" group. Records with an `Unknown`
/// group value form their own group. Requesting an absent group or
/// value column yields `Unavailable` rather than an error.
pub fn aggregate(
    dataset: &Dataset,
    group_fields: &[&str],
    value_field: &str,
    op: &AggregateOp,
) -> Computation<AggregationResult> {
    let mut missing: Vec<String> = group_fields
        .iter()
        .filter(|f| !dataset.has_column(f))
        .map(|f| f.to_string())
        .collect();
    if op.needs_value_column() && !dataset.has_column(value_field) {
        missing.push(value_field.to_string());
    }
    if !missing.is_empty() && !dataset.is_empty() {
        return Computation::Unavailable { missing };
    }

    let mut order: Vec<GroupKey> = Vec::new();
    let mut accumulators: HashMap<GroupKey, GroupAccumulator> = HashMap::new();

    for record in dataset.records() {
        let key = match group_fields {
            [] => GroupKey::overall(),
            [field] => GroupKey::single(record.value(field).group_label()),
            [first, second, ..] => GroupKey::pair(
                record.value(first).group_label(),
                record.value(second).group_label(),
            ),
        };

        let acc = accumulators.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            GroupAccumulator {
                count: 0,
                numeric: Vec::new(),
                matching: 0,
            }
        });

        acc.count += 1;
        let value = record.value(value_field);
        if let Some(v) = value.as_f64() {
            acc.numeric.push(v);
        }
        if let AggregateOp::RateOf(target) = op {
            if !value.is_unknown() && value.group_label() == *target {
                acc.matching += 1;
            }
        }
    }

    let groups = order
        .into_iter()
        .map(|key| {
            let acc = &accumulators[&key];
            let value = match op {
                AggregateOp::Count => Some(acc.count as f64),
                AggregateOp::Mean => mean(&acc.numeric),
                AggregateOp::Median => median(&acc.numeric),
                AggregateOp::StdDev => sample_std(&acc.numeric),
                AggregateOp::RateOf(_) => {
                    Some(acc.matching as f64 / acc.count as f64 * 100.0)
                }
            };
            let stats = GroupStats {
                count: acc.count,
                value,
            };
            (key, stats)
        })
        .collect();

    Computation::Computed(AggregationResult { groups })
}

/// Rate of membership in a value set: the sum of single-target rates,
/// as a percentage of each group's full count. Used for ordinal levels
/// that read together, e.g. work interference "Often" or "Sometimes".
pub fn rate_of_any(
    dataset: &Dataset,
    group_fields: &[&str],
    value_field: &str,
    targets: &[&str],
) -> Computation<AggregationResult> {
    let mut merged: Option<AggregationResult> = None;
    for target in targets {
        match aggregate(
            dataset,
            group_fields,
            value_field,
            &AggregateOp::RateOf(target.to_string()),
        ) {
            Computation::Computed(rates) => {
                merged = Some(match merged {
                    None => rates,
                    Some(base) => sum_group_values(&base, &rates),
                });
            }
            other => return other,
        }
    }
    Computation::Computed(merged.unwrap_or_default())
}

// Both sides come from the same grouping pass, so the group sets match.
fn sum_group_values(a: &AggregationResult, b: &AggregationResult) -> AggregationResult {
    let groups = a
        .iter()
        .map(|(key, stats)| {
            let add = b.get(key).and_then(|s| s.value).unwrap_or(0.0);
            (
                key.clone(),
                GroupStats {
                    count: stats.count,
                    value: Some(stats.value.unwrap_or(0.0) + add),
                },
            )
        })
        .collect();
    AggregationResult::from_groups(groups)
}

/// Per-group {count, mean, median, std} summary table over one grouping
/// field, in first-seen group order.
pub fn summarize_groups(
    dataset: &Dataset,
    group_field: &str,
    value_field: &str,
) -> Computation<Vec<GroupSummary>> {
    let mut missing = Vec::new();
    for field in [group_field, value_field] {
        if !dataset.has_column(field) {
            missing.push(field.to_string());
        }
    }
    if !missing.is_empty() && !dataset.is_empty() {
        return Computation::Unavailable { missing };
    }

    let mut order: Vec<GroupKey> = Vec::new();
    let mut accumulators: HashMap<GroupKey, (usize, Vec<f64>)> = HashMap::new();

    for record in dataset.records() {
        let key = GroupKey::single(record.value(group_field).group_label());
        let acc = accumulators.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            (0, Vec::new())
        });
        acc.0 += 1;
        if let Some(v) = record.value(value_field).as_f64() {
            acc.1.push(v);
        }
    }

    let summaries = order
        .into_iter()
        .map(|key| {
            let (count, values) = &accumulators[&key];
            GroupSummary {
                key,
                count: *count,
                mean: mean(values),
                median: median(values),
                std_dev: sample_std(values),
            }
        })
        .collect();

    Computation::Computed(summaries)
}
