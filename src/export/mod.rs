//! Delimited-text export of datasets and aggregate tables.
//!
//! Floats are rendered to two decimal places so exported numbers
//! round-trip at the precision the rendering layer displays.

use crate::analysis::{AggregationResult, CompositeIndex, GroupSummary};
use crate::models::{Dataset, FieldValue};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to finish csv buffer: {0}")]
    Io(#[from] std::io::Error),
    #[error("export produced invalid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

fn render_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(v) => v.clone(),
        FieldValue::Int(v) => v.to_string(),
        FieldValue::Float(v) => format!("{v:.2}"),
        FieldValue::Unknown => String::new(),
    }
}

fn render_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let buffer = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8(buffer)?)
}

/// Dataset rows as CSV. With no explicit column list, the union of
/// record fields is exported in sorted order; unknown cells are empty.
pub fn dataset_to_csv(dataset: &Dataset, columns: Option<&[String]>) -> Result<String, ExportError> {
    let column_names: Vec<String> = match columns {
        Some(names) => names.to_vec(),
        None => dataset.column_names(),
    };

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&column_names)?;
    for record in dataset.records() {
        let row: Vec<String> = column_names
            .iter()
            .map(|name| render_value(record.value(name)))
            .collect();
        writer.write_record(&row)?;
    }
    finish(writer)
}

/// One-statistic aggregation table as CSV.
pub fn aggregation_to_csv(
    result: &AggregationResult,
    group_header: &str,
    value_header: &str,
) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([group_header, "count", value_header])?;
    for (key, stats) in result.iter() {
        writer.write_record([
            key.to_string(),
            stats.count.to_string(),
            render_opt(stats.value),
        ])?;
    }
    finish(writer)
}

/// Full group-summary table as CSV.
pub fn summaries_to_csv(
    summaries: &[GroupSummary],
    group_header: &str,
) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([group_header, "count", "mean", "median", "std_dev"])?;
    for summary in summaries {
        writer.write_record([
            summary.key.to_string(),
            summary.count.to_string(),
            render_opt(summary.mean),
            render_opt(summary.median),
            render_opt(summary.std_dev),
        ])?;
    }
    finish(writer)
}

/// Composite index table as CSV, completeness column included.
pub fn index_to_csv(index: &CompositeIndex, group_header: &str) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([group_header, "score", "components_present"])?;
    for (key, score) in index.iter() {
        writer.write_record([
            key.to_string(),
            format!("{:.2}", score.value),
            score.components_present.to_string(),
        ])?;
    }
    finish(writer)
}
