//! Display-only outlier trimming.
//!
//! Extreme compensation values would otherwise dominate the visual
//! scale of distribution charts. Trimming is an explicitly named
//! operation; summary statistics feeding insight text never pass
//! through it.

use crate::models::Dataset;

/// Percentile with linear interpolation over an already sorted sample.
pub fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    if sorted.len() == 1 {
        return Some(sorted[0]);
    }
    let rank = q * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    let weight = rank - lower as f64;
    Some(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
}

/// Fence bounds: [P5 - 1.5*IQR, P95 + 1.5*IQR], with the IQR computed
/// on the 5th/95th percentile pair of the sample.
fn display_fence(values: &[f64]) -> Option<(f64, f64)> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let q1 = percentile(&sorted, 0.05)?;
    let q3 = percentile(&sorted, 0.95)?;
    let iqr = q3 - q1;
    Some((q1 - 1.5 * iqr, q3 + 1.5 * iqr))
}

/// Values surviving the display fence, input order preserved.
pub fn trim_for_display(values: &[f64]) -> Vec<f64> {
    match display_fence(values) {
        Some((low, high)) => values
            .iter()
            .copied()
            .filter(|v| *v >= low && *v <= high)
            .collect(),
        None => Vec::new(),
    }
}

/// Dataset variant for distribution charts of one numeric column:
/// keeps only records whose value for `field` is known and inside the
/// fence.
pub fn trim_field_for_display(dataset: &Dataset, field: &str) -> Dataset {
    let values = dataset.numeric_values(field);
    match display_fence(&values) {
        Some((low, high)) => dataset.retain(|record| {
            record
                .value(field)
                .as_f64()
                .is_some_and(|v| v >= low && v <= high)
        }),
        None => Dataset::default(),
    }
}
