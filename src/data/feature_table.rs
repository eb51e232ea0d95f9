//! Column-oriented table of named numeric features.

use crate::error::{EdaError, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Cell spellings treated as missing when parsing text input.
const MISSING_TOKENS: [&str; 5] = ["", "NA", "NaN", "nan", "null"];

/// An ordered collection of named numeric columns.
///
/// All columns have the same length. Missing observations are stored as
/// `NaN` and are skipped pairwise by the statistics routines.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    /// Feature names in column order.
    names: Vec<String>,
    /// Column values, one vector per feature.
    columns: Vec<Vec<f64>>,
}

impl FeatureTable {
    /// Create a table from feature names and their columns.
    pub fn new(names: Vec<String>, columns: Vec<Vec<f64>>) -> Result<Self> {
        if names.len() != columns.len() {
            return Err(EdaError::DimensionMismatch {
                expected: names.len(),
                actual: columns.len(),
            });
        }
        if names.is_empty() {
            return Err(EdaError::EmptyData("table has no columns".to_string()));
        }

        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(EdaError::DuplicateColumn(name.clone()));
            }
        }

        let n_rows = columns[0].len();
        for column in &columns[1..] {
            if column.len() != n_rows {
                return Err(EdaError::DimensionMismatch {
                    expected: n_rows,
                    actual: column.len(),
                });
            }
        }

        Ok(Self { names, columns })
    }

    /// Build a table from `(name, values)` pairs, keeping their order.
    pub fn from_columns<S, I>(columns: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Vec<f64>)>,
    {
        let (names, columns): (Vec<String>, Vec<Vec<f64>>) = columns
            .into_iter()
            .map(|(name, values)| (name.into(), values))
            .unzip();
        Self::new(names, columns)
    }

    /// Load a table from a CSV file with a header row of feature names.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse a CSV document from any reader.
    ///
    /// Empty cells and the usual missing-value spellings (`NA`, `NaN`,
    /// `nan`, `null`) become `NaN`. Any other non-numeric cell is an error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let names: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        if names.is_empty() {
            return Err(EdaError::EmptyData("CSV header has no columns".to_string()));
        }
        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); names.len()];

        for (row_idx, record) in csv_reader.records().enumerate() {
            let record = record?;
            for (col_idx, field) in record.iter().enumerate() {
                let value = parse_cell(field).ok_or_else(|| EdaError::InvalidValue {
                    value: field.to_string(),
                    row: row_idx,
                    column: names[col_idx].clone(),
                })?;
                columns[col_idx].push(value);
            }
        }

        if columns[0].is_empty() {
            return Err(EdaError::EmptyData("CSV has no data rows".to_string()));
        }

        Self::new(names, columns)
    }

    /// Number of features (columns).
    #[inline]
    pub fn n_features(&self) -> usize {
        self.names.len()
    }

    /// Number of observations (rows).
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.columns[0].len()
    }

    /// Feature names in column order.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Values of the feature at position `idx`.
    #[inline]
    pub fn column_at(&self, idx: usize) -> &[f64] {
        &self.columns[idx]
    }

    /// Values of a feature looked up by name.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.position(name)
            .map(|idx| self.columns[idx].as_slice())
            .ok_or_else(|| EdaError::MissingColumn(name.to_string()))
    }

    /// Position of a feature in column order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Count of non-missing values per feature.
    pub fn non_missing_counts(&self) -> Vec<usize> {
        self.columns
            .iter()
            .map(|c| c.iter().filter(|v| !v.is_nan()).count())
            .collect()
    }
}

fn parse_cell(field: &str) -> Option<f64> {
    if MISSING_TOKENS.contains(&field) {
        return Some(f64::NAN);
    }
    field.parse::<f64>().ok()
}
