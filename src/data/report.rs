//! Interleaved correlation report types.

use crate::error::Result;
use crate::stats::format_float;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Statistic shown in one report row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statistic {
    /// Pearson correlation coefficient.
    PearsonR,
    /// Two-tailed p-value of the correlation test.
    PValue,
    /// Number of pairwise-complete observations.
    SampleSize,
}

impl Statistic {
    /// Order of statistic rows within a feature group.
    pub const ORDER: [Statistic; 3] = [Self::PearsonR, Self::PValue, Self::SampleSize];

    /// Row label used in the report.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PearsonR => "Pearson's r",
            Self::PValue => "p-value",
            Self::SampleSize => "Sample size",
        }
    }
}

impl std::fmt::Display for Statistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Cell values of one report row.
///
/// A row is either fully numeric or fully annotated with significance
/// markers; the two are never mixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "cells", rename_all = "snake_case")]
pub enum ReportValues {
    /// Rounded numeric cells; `NaN` means missing.
    ///
    /// JSON has no NaN, so missing cells are written as `null` and read
    /// back as `NaN`.
    Numeric(#[serde(deserialize_with = "deserialize_cells")] Vec<f64>),
    /// Display strings with significance markers appended.
    Annotated(Vec<String>),
}

impl ReportValues {
    /// Number of cells.
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::Annotated(v) => v.len(),
        }
    }

    /// Check if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Numeric cells, if this row is numeric.
    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            Self::Numeric(v) => Some(v),
            Self::Annotated(_) => None,
        }
    }

    /// Annotated cells, if this row carries markers.
    pub fn as_annotated(&self) -> Option<&[String]> {
        match self {
            Self::Numeric(_) => None,
            Self::Annotated(v) => Some(v),
        }
    }

    /// Display form of the cell at `idx`.
    pub fn display_cell(&self, idx: usize) -> String {
        match self {
            Self::Numeric(v) => format_float(v[idx]),
            Self::Annotated(v) => v[idx].clone(),
        }
    }
}

fn deserialize_cells<'de, D>(deserializer: D) -> std::result::Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let cells: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
    Ok(cells.into_iter().map(|c| c.unwrap_or(f64::NAN)).collect())
}

/// One row of the report, keyed by (feature, statistic).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Feature this row belongs to.
    pub feature: String,
    /// Statistic shown in this row.
    pub statistic: Statistic,
    /// One cell per feature column.
    pub values: ReportValues,
}

/// SPSS-style correlation report.
///
/// Rows are grouped per feature in input order; within a group the
/// statistics follow [`Statistic::ORDER`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    /// Column feature names.
    pub columns: Vec<String>,
    /// Rows in display order.
    pub rows: Vec<ReportRow>,
}

impl CorrelationReport {
    /// Create a report from its columns and rows.
    pub fn new(columns: Vec<String>, rows: Vec<ReportRow>) -> Self {
        Self { columns, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in display order.
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Column feature names.
    pub fn feature_names(&self) -> &[String] {
        &self.columns
    }

    /// Iterate over rows.
    pub fn iter(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter()
    }

    /// Get the row for a feature and statistic.
    pub fn row(&self, feature: &str, statistic: Statistic) -> Option<&ReportRow> {
        self.rows
            .iter()
            .find(|r| r.feature == feature && r.statistic == statistic)
    }

    /// Statistics present in each group, in order.
    pub fn statistics(&self) -> Vec<Statistic> {
        let Some(first) = self.rows.first() else {
            return Vec::new();
        };
        self.rows
            .iter()
            .take_while(|r| r.feature == first.feature)
            .map(|r| r.statistic)
            .collect()
    }

    /// Display string of a single cell.
    pub fn cell(&self, feature: &str, statistic: Statistic, column: &str) -> Option<String> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.row(feature, statistic).map(|r| r.values.display_cell(col))
    }

    /// Write the report to a TSV file.
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_tsv(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the report as TSV to any writer.
    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> Result<()> {
        write!(writer, "feature\tstatistic")?;
        for column in &self.columns {
            write!(writer, "\t{}", column)?;
        }
        writeln!(writer)?;

        for row in &self.rows {
            write!(writer, "{}\t{}", row.feature, row.statistic)?;
            for idx in 0..row.values.len() {
                write!(writer, "\t{}", row.values.display_cell(idx))?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for CorrelationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| (0..r.values.len()).map(|i| r.values.display_cell(i)).collect())
            .collect();

        let feature_width = self
            .rows
            .iter()
            .map(|r| r.feature.chars().count())
            .max()
            .unwrap_or(0);
        let statistic_width = self
            .rows
            .iter()
            .map(|r| r.statistic.label().chars().count())
            .max()
            .unwrap_or(0);
        let column_widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(j, name)| {
                cells
                    .iter()
                    .filter_map(|row| row.get(j))
                    .map(|c| c.chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:fw$}  {:sw$}", "", "", fw = feature_width, sw = statistic_width)?;
        for (name, width) in self.columns.iter().zip(&column_widths) {
            write!(f, "  {:>width$}", name, width = width)?;
        }
        writeln!(f)?;

        let mut previous: Option<&str> = None;
        for (row, row_cells) in self.rows.iter().zip(&cells) {
            // Feature name only on the first row of its group.
            let feature = if previous == Some(row.feature.as_str()) {
                ""
            } else {
                row.feature.as_str()
            };
            previous = Some(row.feature.as_str());

            write!(
                f,
                "{:fw$}  {:sw$}",
                feature,
                row.statistic.label(),
                fw = feature_width,
                sw = statistic_width
            )?;
            for (cell, width) in row_cells.iter().zip(&column_widths) {
                write!(f, "  {:>width$}", cell, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> CorrelationReport {
        let columns = vec!["a".to_string(), "b".to_string()];
        let rows = vec![
            ReportRow {
                feature: "a".into(),
                statistic: Statistic::PearsonR,
                values: ReportValues::Annotated(vec!["1.0".into(), "0.9**".into()]),
            },
            ReportRow {
                feature: "a".into(),
                statistic: Statistic::PValue,
                values: ReportValues::Numeric(vec![1.0, 0.004]),
            },
            ReportRow {
                feature: "b".into(),
                statistic: Statistic::PearsonR,
                values: ReportValues::Annotated(vec!["0.9**".into(), "1.0".into()]),
            },
            ReportRow {
                feature: "b".into(),
                statistic: Statistic::PValue,
                values: ReportValues::Numeric(vec![0.004, 1.0]),
            },
        ];
        CorrelationReport::new(columns, rows)
    }

    #[test]
    fn test_statistic_labels() {
        assert_eq!(Statistic::PearsonR.label(), "Pearson's r");
        assert_eq!(Statistic::PValue.label(), "p-value");
        assert_eq!(Statistic::SampleSize.to_string(), "Sample size");
    }

    #[test]
    fn test_lookup() {
        let report = sample_report();
        assert_eq!(report.len(), 4);
        assert_eq!(
            report.statistics(),
            vec![Statistic::PearsonR, Statistic::PValue]
        );
        assert_eq!(
            report.cell("b", Statistic::PearsonR, "a").as_deref(),
            Some("0.9**")
        );
        assert_eq!(
            report.cell("a", Statistic::PValue, "b").as_deref(),
            Some("0.004")
        );
        assert!(report.row("a", Statistic::SampleSize).is_none());
    }

    #[test]
    fn test_write_tsv() {
        let report = sample_report();
        let mut buffer = Vec::new();
        report.write_tsv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "feature\tstatistic\ta\tb");
        assert_eq!(lines[1], "a\tPearson's r\t1.0\t0.9**");
        assert_eq!(lines[2], "a\tp-value\t1.0\t0.004");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_display_blanks_repeated_feature() {
        let text = sample_report().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with("a  Pearson's r"));
        assert!(lines[2].starts_with("   p-value"));
        assert!(lines[3].starts_with("b  Pearson's r"));
    }

    #[test]
    fn test_display_aligns_non_ascii_names() {
        let report = CorrelationReport::new(
            vec!["größe".into(), "b".into()],
            vec![
                ReportRow {
                    feature: "größe".into(),
                    statistic: Statistic::PearsonR,
                    values: ReportValues::Numeric(vec![1.0, 0.5]),
                },
                ReportRow {
                    feature: "größe".into(),
                    statistic: Statistic::PValue,
                    values: ReportValues::Numeric(vec![1.0, 0.25]),
                },
            ],
        );
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2].find("p-value"), Some(7));

        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|&w| w == widths[0]));
    }

    #[test]
    fn test_serde_round_trip_json() {
        let report = sample_report();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"kind\":\"annotated\""));
        let parsed: CorrelationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_missing_cells_survive_json() {
        let report = CorrelationReport::new(
            vec!["a".into(), "b".into()],
            vec![ReportRow {
                feature: "a".into(),
                statistic: Statistic::SampleSize,
                values: ReportValues::Numeric(vec![f64::NAN, 5.0]),
            }],
        );
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"cells\":[null,5.0]"));

        let parsed: CorrelationReport = serde_json::from_str(&json).unwrap();
        let cells = parsed.rows[0].values.as_numeric().unwrap();
        assert!(cells[0].is_nan());
        assert_eq!(cells[1], 5.0);
    }

    #[test]
    fn test_missing_cells_survive_yaml() {
        let yaml = "columns: [a, b]\nrows:\n- feature: a\n  statistic: SampleSize\n  values:\n    kind: numeric\n    cells: [.nan, 5.0]\n";
        let parsed: CorrelationReport = serde_yaml::from_str(yaml).unwrap();
        let cells = parsed.rows[0].values.as_numeric().unwrap();
        assert!(cells[0].is_nan());
        assert_eq!(cells[1], 5.0);
    }
}
