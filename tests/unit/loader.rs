//! Unit tests for dataset loading and memoization

use mindmetrics::loader::{DataLoader, DatasetSchema};
use mindmetrics::models::columns;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mindmetrics-loader-{}-{}", std::process::id(), name));
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

const SAMPLE: &str = "\
Age,Country,Treatment
30,Germany,Yes
NA,France,No
,Canada,
not-a-number,Germany,Yes
";

#[test]
fn headers_are_lowercased_and_cells_typed() {
    let dir = scratch_dir("parse");
    fs::write(dir.join("survey.csv"), SAMPLE).unwrap();

    let loader = DataLoader::new(&dir);
    let dataset = loader
        .load("survey.csv", &DatasetSchema::mental_health())
        .expect("load sample");

    assert_eq!(dataset.len(), 4);
    assert!(dataset.has_column(columns::AGE));
    assert!(dataset.has_column(columns::COUNTRY));

    let records = dataset.records();
    assert_eq!(records[0].value(columns::AGE).as_int(), Some(30));
    // NA, empty, and unparsable cells all load as unknown.
    assert!(records[1].value(columns::AGE).is_unknown());
    assert!(records[2].value(columns::AGE).is_unknown());
    assert!(records[2].value(columns::TREATMENT).is_unknown());
    assert!(records[3].value(columns::AGE).is_unknown());
}

#[test]
fn age_group_is_derived_at_load_time() {
    let dir = scratch_dir("derive");
    fs::write(dir.join("survey.csv"), SAMPLE).unwrap();

    let loader = DataLoader::new(&dir);
    let dataset = loader
        .load("survey.csv", &DatasetSchema::mental_health())
        .unwrap();

    assert!(dataset.has_column(columns::AGE_GROUP));
    assert_eq!(
        dataset.records()[0].value(columns::AGE_GROUP).group_label(),
        "25-34"
    );
    assert_eq!(
        dataset.records()[1].value(columns::AGE_GROUP).group_label(),
        "Unknown"
    );
}

#[test]
fn repeated_loads_share_the_cached_dataset() {
    let dir = scratch_dir("cache");
    fs::write(dir.join("survey.csv"), SAMPLE).unwrap();

    let loader = DataLoader::new(&dir);
    let schema = DatasetSchema::mental_health();
    let first = loader.load("survey.csv", &schema).unwrap();
    let second = loader.load("survey.csv", &schema).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn invalidation_forces_a_reload() {
    let dir = scratch_dir("invalidate");
    fs::write(dir.join("survey.csv"), SAMPLE).unwrap();

    let loader = DataLoader::new(&dir);
    let schema = DatasetSchema::mental_health();
    let first = loader.load("survey.csv", &schema).unwrap();

    fs::write(dir.join("survey.csv"), "Age,Country,Treatment\n41,Sweden,No\n").unwrap();
    loader.invalidate("survey.csv");

    let reloaded = loader.load("survey.csv", &schema).unwrap();
    assert!(!Arc::ptr_eq(&first, &reloaded));
    assert_eq!(reloaded.len(), 1);
}

#[test]
fn missing_file_is_a_load_error() {
    let dir = scratch_dir("missing");
    let loader = DataLoader::new(&dir);
    let result = loader.load("nope.csv", &DatasetSchema::career());
    assert!(result.is_err());
    let message = result.err().unwrap().to_string();
    assert!(message.contains("nope.csv"));
}
