//! Unit tests for declarative filter application

use crate::fixtures;
use mindmetrics::filters::{apply, Constraint, FilterSpec};
use mindmetrics::models::{columns, Dataset, FieldValue, Record};

#[test]
fn one_of_keeps_only_matching_records() {
    let dataset = fixtures::mental_health();
    assert_eq!(dataset.len(), 10);

    let germany = apply(
        &dataset,
        &FilterSpec::new().with_one_of(columns::COUNTRY, ["Germany"]),
    );
    assert_eq!(germany.len(), 3);
    for record in germany.records() {
        assert_eq!(record.value(columns::COUNTRY).group_label(), "Germany");
    }
}

#[test]
fn empty_spec_and_empty_value_set_accept_everything() {
    let dataset = fixtures::mental_health();

    let untouched = apply(&dataset, &FilterSpec::new());
    assert_eq!(untouched.len(), dataset.len());

    let empty_set = apply(
        &dataset,
        &FilterSpec::new().with_one_of(columns::COUNTRY, Vec::<String>::new()),
    );
    assert_eq!(empty_set.len(), dataset.len());
}

#[test]
fn constraint_on_absent_column_is_a_no_op() {
    let dataset = fixtures::mental_health();
    let filtered = apply(
        &dataset,
        &FilterSpec::new().with_one_of(columns::DEV_TYPE, ["Back-end developer"]),
    );
    assert_eq!(filtered.len(), dataset.len());
}

#[test]
fn unknown_never_passes_membership() {
    let dataset = fixtures::mental_health();
    // One respondent declined the treatment question; a positive
    // membership test must not capture them, even under the literal
    // "Unknown" label.
    let yes_or_no = apply(
        &dataset,
        &FilterSpec::new().with_one_of(columns::TREATMENT, ["Yes", "No", "Unknown"]),
    );
    assert_eq!(yes_or_no.len(), 9);
}

#[test]
fn range_bounds_are_inclusive() {
    let constraint = Constraint::Range { min: 25, max: 34 };
    assert!(constraint.accepts(&FieldValue::Int(25)));
    assert!(constraint.accepts(&FieldValue::Int(34)));
    assert!(!constraint.accepts(&FieldValue::Int(24)));
    assert!(!constraint.accepts(&FieldValue::Int(35)));
    assert!(!constraint.accepts(&FieldValue::Unknown));
}

#[test]
fn filtering_is_idempotent() {
    let dataset = fixtures::mental_health();
    let spec = FilterSpec::new()
        .with_one_of(columns::COUNTRY, ["Germany", "Canada"])
        .with_range(columns::AGE, 25, 50);

    let once = apply(&dataset, &spec);
    let twice = apply(&once, &spec);
    assert_eq!(once.len(), twice.len());
}

#[test]
fn adding_constraints_never_grows_the_result() {
    let dataset = fixtures::mental_health();
    let loose = apply(
        &dataset,
        &FilterSpec::new().with_one_of(columns::TREATMENT, ["Yes"]),
    );
    let tight = apply(
        &dataset,
        &FilterSpec::new()
            .with_one_of(columns::TREATMENT, ["Yes"])
            .with_one_of(columns::REMOTE_WORK, ["No"]),
    );
    assert!(tight.len() <= loose.len());
}

#[test]
fn age_group_constraint_derives_the_column_first() {
    let dataset = Dataset::new(vec![
        Record::new().with_field(columns::AGE, FieldValue::Int(23)),
        Record::new().with_field(columns::AGE, FieldValue::Int(30)),
        Record::new().with_field(columns::AGE, FieldValue::Int(31)),
    ]);
    assert!(!dataset.has_column(columns::AGE_GROUP));

    let filtered = apply(
        &dataset,
        &FilterSpec::new().with_one_of(columns::AGE_GROUP, ["25-34"]),
    );
    assert_eq!(filtered.len(), 2);
}
