//! Delimited-text dataset loading with path-keyed memoization.
//!
//! The loader owns schema normalization: headers are lowercased, cells
//! are typed per the dataset schema, and anything empty or unparsable
//! becomes `Unknown`. Loaded datasets are cached by source path; the
//! cache is the only state that survives across requests and is
//! invalidated explicitly when a source changes.

use crate::filters::derive_age_groups;
use crate::models::{columns, Dataset, FieldValue, Record};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum LoadError {
    /// Covers both unreadable files and malformed rows; the csv error
    /// carries the io cause when there is one.
    #[error("failed to load {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    Float,
}

/// Column typing for one survey file. Columns not listed load as text.
#[derive(Debug, Clone)]
pub struct DatasetSchema {
    types: HashMap<String, ColumnType>,
}

impl DatasetSchema {
    pub fn new(types: impl IntoIterator<Item = (&'static str, ColumnType)>) -> Self {
        Self {
            types: types
                .into_iter()
                .map(|(name, ty)| (name.to_string(), ty))
                .collect(),
        }
    }

    pub fn mental_health() -> Self {
        Self::new([(columns::AGE, ColumnType::Integer)])
    }

    pub fn career() -> Self {
        Self::new([
            (columns::AGE, ColumnType::Integer),
            (columns::COMPENSATION, ColumnType::Float),
        ])
    }

    pub fn column_type(&self, name: &str) -> ColumnType {
        self.types.get(name).copied().unwrap_or(ColumnType::Text)
    }
}

/// Loads and memoizes survey datasets.
pub struct DataLoader {
    data_dir: PathBuf,
    cache: RwLock<HashMap<PathBuf, Arc<Dataset>>>,
}

impl DataLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Load a file relative to the data directory, serving the cached
    /// dataset when the path was already loaded.
    pub fn load(
        &self,
        file_name: &str,
        schema: &DatasetSchema,
    ) -> Result<Arc<Dataset>, LoadError> {
        let path = self.data_dir.join(file_name);

        if let Ok(cache) = self.cache.read() {
            if let Some(dataset) = cache.get(&path) {
                return Ok(dataset.clone());
            }
        }

        let dataset = Arc::new(read_csv(&path, schema)?);
        info!(path = %path.display(), records = dataset.len(), "survey dataset loaded");

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(path, dataset.clone());
        }
        Ok(dataset)
    }

    /// Drop the cached dataset for a source path, forcing a reload on
    /// the next request. Called when the underlying file changes.
    pub fn invalidate(&self, file_name: &str) {
        let path = self.data_dir.join(file_name);
        if let Ok(mut cache) = self.cache.write() {
            cache.remove(&path);
        }
    }
}

fn read_csv(path: &Path, schema: &DatasetSchema) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| csv_error(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| csv_error(path, e))?;
        let mut record = Record::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            record.set(header.clone(), parse_cell(cell, schema.column_type(header)));
        }
        records.push(record);
    }

    // Derive the age-group column once here so grouping by it never
    // depends on a filter pass having run first.
    let dataset = Dataset::new(records);
    if dataset.has_column(columns::AGE) {
        Ok(derive_age_groups(&dataset))
    } else {
        Ok(dataset)
    }
}

fn csv_error(path: &Path, source: csv::Error) -> LoadError {
    LoadError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

fn parse_cell(cell: &str, column_type: ColumnType) -> FieldValue {
    let cell = cell.trim();
    if cell.is_empty() || cell == "NA" || cell == "N/A" {
        return FieldValue::Unknown;
    }
    match column_type {
        ColumnType::Text => FieldValue::text(cell),
        ColumnType::Integer => cell
            .parse::<i64>()
            .map(FieldValue::Int)
            .unwrap_or(FieldValue::Unknown),
        ColumnType::Float => cell
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(FieldValue::Float)
            .unwrap_or(FieldValue::Unknown),
    }
}
