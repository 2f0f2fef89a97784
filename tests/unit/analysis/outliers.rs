//! Unit tests for display-only outlier trimming

use mindmetrics::analysis::outliers::{percentile, trim_for_display};
use mindmetrics::analysis::trim_field_for_display;
use mindmetrics::models::{columns, Dataset, FieldValue, Record};

#[test]
fn percentile_interpolates_linearly() {
    let sorted = vec![0.0, 10.0, 20.0, 30.0, 40.0];
    assert_eq!(percentile(&sorted, 0.0), Some(0.0));
    assert_eq!(percentile(&sorted, 0.5), Some(20.0));
    assert_eq!(percentile(&sorted, 1.0), Some(40.0));
    assert_eq!(percentile(&sorted, 0.25), Some(10.0));
    let p = percentile(&sorted, 0.1).unwrap();
    assert!((p - 4.0).abs() < 1e-9);
}

#[test]
fn percentile_rejects_bad_input() {
    assert_eq!(percentile(&[], 0.5), None);
    assert_eq!(percentile(&[1.0], 1.5), None);
    assert_eq!(percentile(&[7.0], 0.95), Some(7.0));
}

#[test]
fn extreme_values_fall_outside_the_fence() {
    let mut values: Vec<f64> = (0..=20).map(|v| (v * 5) as f64).collect();
    values.push(10_000.0);

    let trimmed = trim_for_display(&values);
    assert_eq!(trimmed.len(), 21);
    assert!(!trimmed.contains(&10_000.0));
    // Input order is preserved for survivors.
    assert_eq!(trimmed[0], 0.0);
    assert_eq!(trimmed[20], 100.0);
}

#[test]
fn empty_input_trims_to_empty() {
    assert!(trim_for_display(&[]).is_empty());
}

#[test]
fn field_trimming_drops_unknown_and_outlier_records() {
    let mut records: Vec<Record> = (0..=20)
        .map(|v| Record::new().with_field(columns::COMPENSATION, FieldValue::Float((v * 5) as f64)))
        .collect();
    records.push(Record::new().with_field(columns::COMPENSATION, FieldValue::Float(10_000.0)));
    records.push(Record::new().with_field(columns::COMPENSATION, FieldValue::Unknown));

    let dataset = Dataset::new(records);
    let trimmed = trim_field_for_display(&dataset, columns::COMPENSATION);
    assert_eq!(trimmed.len(), 21);
    assert_eq!(dataset.len(), 23);
}
