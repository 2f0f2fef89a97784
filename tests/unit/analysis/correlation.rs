//! Unit tests for Pearson correlation

use mindmetrics::analysis::column_correlation;
use mindmetrics::analysis::correlation::{paired_values, pearson};
use mindmetrics::models::{columns, Dataset, FieldValue, Record};

fn pair_record(x: f64, y: f64) -> Record {
    Record::new()
        .with_field(columns::AGE, FieldValue::Float(x))
        .with_field(columns::COMPENSATION, FieldValue::Float(y))
}

#[test]
fn perfect_linear_relationships() {
    let positive = pearson(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]).unwrap();
    assert!((positive - 1.0).abs() < 1e-9);

    let negative = pearson(&[(1.0, 6.0), (2.0, 4.0), (3.0, 2.0)]).unwrap();
    assert!((negative + 1.0).abs() < 1e-9);
}

#[test]
fn degenerate_samples_have_no_correlation() {
    assert_eq!(pearson(&[]), None);
    assert_eq!(pearson(&[(1.0, 2.0)]), None);
    // Zero variance on one side.
    assert_eq!(pearson(&[(1.0, 5.0), (2.0, 5.0), (3.0, 5.0)]), None);
}

#[test]
fn pairing_skips_records_with_a_missing_side() {
    let mut half = Record::new().with_field(columns::AGE, FieldValue::Float(9.0));
    half.set(columns::COMPENSATION, FieldValue::Unknown);

    let dataset = Dataset::new(vec![pair_record(1.0, 10.0), half, pair_record(2.0, 20.0)]);
    let pairs = paired_values(&dataset, columns::AGE, columns::COMPENSATION);
    assert_eq!(pairs, vec![(1.0, 10.0), (2.0, 20.0)]);
}

#[test]
fn column_correlation_matches_pairwise_pearson() {
    let dataset = Dataset::new(vec![
        pair_record(1.0, 2.0),
        pair_record(2.0, 4.1),
        pair_record(3.0, 5.9),
        pair_record(4.0, 8.2),
    ]);
    let r = column_correlation(&dataset, columns::AGE, columns::COMPENSATION).unwrap();
    assert!(r > 0.99);
}
