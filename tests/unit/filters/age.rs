//! Unit tests for the derived age-group column

use mindmetrics::filters::{derive_age_groups, AgeBucket};
use mindmetrics::models::{columns, Dataset, FieldValue, Record};

#[test]
fn bucket_boundaries_are_exclusive_upwards() {
    assert_eq!(AgeBucket::from_age(24), AgeBucket::Under25);
    assert_eq!(AgeBucket::from_age(25), AgeBucket::From25To34);
    assert_eq!(AgeBucket::from_age(34), AgeBucket::From25To34);
    assert_eq!(AgeBucket::from_age(35), AgeBucket::From35To44);
    assert_eq!(AgeBucket::from_age(44), AgeBucket::From35To44);
    assert_eq!(AgeBucket::from_age(45), AgeBucket::From45To54);
    assert_eq!(AgeBucket::from_age(54), AgeBucket::From45To54);
    assert_eq!(AgeBucket::from_age(55), AgeBucket::Over54);
    assert_eq!(AgeBucket::from_age(80), AgeBucket::Over54);
}

#[test]
fn unknown_age_lands_in_unknown_bucket() {
    assert_eq!(AgeBucket::from_value(&FieldValue::Unknown), AgeBucket::Unknown);
    assert_eq!(
        AgeBucket::from_value(&FieldValue::text("thirty")),
        AgeBucket::Unknown
    );
}

#[test]
fn ordered_buckets_carry_display_labels() {
    let labels: Vec<&str> = AgeBucket::ORDERED.iter().map(|b| b.label()).collect();
    assert_eq!(labels, vec!["Under 25", "25-34", "35-44", "45-54", "55+"]);
}

#[test]
fn derive_attaches_column_to_every_record() {
    let dataset = Dataset::new(vec![
        Record::new().with_field(columns::AGE, FieldValue::Int(19)),
        Record::new().with_field(columns::AGE, FieldValue::Int(38)),
        Record::new().with_field(columns::AGE, FieldValue::Unknown),
    ]);
    let derived = derive_age_groups(&dataset);

    let groups: Vec<String> = derived
        .records()
        .iter()
        .map(|r| r.value(columns::AGE_GROUP).group_label())
        .collect();
    assert_eq!(groups, vec!["Under 25", "35-44", "Unknown"]);
    // Source dataset stays schema-unchanged.
    assert!(!dataset.has_column(columns::AGE_GROUP));
}
