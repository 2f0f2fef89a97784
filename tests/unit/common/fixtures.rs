//! Shared in-memory survey fixtures.
#![allow(dead_code)]

use mindmetrics::models::{columns, Dataset, FieldValue, Record};

pub fn respondent(
    country: &str,
    age: i64,
    treatment: &str,
    work_interfere: &str,
    remote: &str,
    company_size: &str,
    consequence: &str,
) -> Record {
    Record::new()
        .with_field(columns::COUNTRY, FieldValue::text(country))
        .with_field(columns::AGE, FieldValue::Int(age))
        .with_field(columns::TREATMENT, FieldValue::text(treatment))
        .with_field(columns::WORK_INTERFERE, FieldValue::text(work_interfere))
        .with_field(columns::REMOTE_WORK, FieldValue::text(remote))
        .with_field(columns::NO_EMPLOYEES, FieldValue::text(company_size))
        .with_field(
            columns::MENTAL_HEALTH_CONSEQUENCE,
            FieldValue::text(consequence),
        )
}

/// Ten respondents across four countries, with one unknown treatment
/// answer and one unknown age.
pub fn mental_health() -> Dataset {
    let mut records = vec![
        respondent("United States", 30, "Yes", "Sometimes", "No", "6-25", "No"),
        respondent("United States", 22, "No", "Never", "Yes", "26-100", "No"),
        respondent("United States", 41, "Yes", "Often", "No", "More than 1000", "Yes"),
        respondent("Germany", 35, "Yes", "Sometimes", "Yes", "6-25", "No"),
        respondent("Germany", 28, "No", "Rarely", "No", "26-100", "Yes"),
        respondent("Germany", 55, "Yes", "Never", "No", "6-25", "No"),
        respondent("Canada", 24, "No", "Sometimes", "Yes", "1-5", "No"),
        respondent("Canada", 47, "Yes", "Often", "No", "26-100", "Yes"),
        respondent("United Kingdom", 33, "No", "Never", "Yes", "More than 1000", "No"),
    ];
    // Tenth respondent declined both the age and treatment questions.
    let mut declined = respondent("United Kingdom", 0, "Yes", "Rarely", "No", "1-5", "No");
    declined.set(columns::AGE, FieldValue::Unknown);
    declined.set(columns::TREATMENT, FieldValue::Unknown);
    records.push(declined);
    Dataset::new(records)
}

pub fn developer(
    dev_type: &str,
    satisfaction: &str,
    mental_health: &str,
    compensation: f64,
) -> Record {
    Record::new()
        .with_field(columns::EMPLOYMENT, FieldValue::text("Employed full-time"))
        .with_field(columns::DEV_TYPE, FieldValue::text(dev_type))
        .with_field(columns::JOB_SATISFACTION, FieldValue::text(satisfaction))
        .with_field(columns::MENTAL_HEALTH, FieldValue::text(mental_health))
        .with_field(columns::COMPENSATION, FieldValue::Float(compensation))
}

pub fn career() -> Dataset {
    Dataset::new(vec![
        developer("Back-end developer", "Very satisfied", "Excellent", 95_000.0),
        developer("Back-end developer", "Slightly satisfied", "Good", 82_000.0),
        developer("Front-end developer", "Very satisfied", "Excellent", 78_000.0),
        developer("Front-end developer", "Slightly dissatisfied", "Poor", 71_000.0),
        developer("Data scientist", "Very satisfied", "Excellent", 110_000.0),
        developer("Data scientist", "Very dissatisfied", "Poor", 99_000.0),
        developer("DevOps specialist", "Slightly satisfied", "Fair", 105_000.0),
        developer("DevOps specialist", "Very dissatisfied", "Poor", 88_000.0),
    ])
}
