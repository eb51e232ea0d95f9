//! Assembly of the interleaved correlation report.

use super::matrices::{coefficient_matrix, p_value_matrix, sample_size_matrix};
use super::options::CorrelationOptions;
use super::significance::annotate;
use crate::data::{CorrelationReport, FeatureTable, PairwiseMatrix, ReportRow, ReportValues, Statistic};
use crate::error::{EdaError, Result};
use log::debug;

/// Build an SPSS-style correlation report.
///
/// For every feature, in table order, the report holds a coefficient row,
/// a p-value row and (unless disabled) a sample-size row. Each row has one
/// cell per feature. Errors from the pairwise correlation test propagate
/// unchanged.
///
/// # Example
///
/// ```
/// use composable_eda::prelude::*;
///
/// let table = FeatureTable::from_columns([
///     ("a", vec![1.0, 2.0, 3.0, 4.0, 5.0]),
///     ("b", vec![2.0, 4.0, 6.0, 8.0, 10.0]),
/// ]).unwrap();
///
/// let report = correlation_report(&table, &CorrelationOptions::default()).unwrap();
/// assert_eq!(report.len(), 6);
/// assert_eq!(report.cell("a", Statistic::SampleSize, "b").as_deref(), Some("5.0"));
/// ```
pub fn correlation_report(
    table: &FeatureTable,
    options: &CorrelationOptions,
) -> Result<CorrelationReport> {
    let coefficients = coefficient_matrix(table)?.rounded(options.decimals);
    let p_values = p_value_matrix(table)?.rounded(options.decimals);
    let sample_sizes = if options.sample_size {
        Some(sample_size_matrix(table)?.rounded(options.decimals))
    } else {
        None
    };

    let coefficient_rows = if options.significance {
        let annotated = annotate(&coefficients, &p_values)?;
        annotated
            .cells
            .into_iter()
            .map(ReportValues::Annotated)
            .collect()
    } else {
        numeric_rows(&coefficients)
    };

    let mut blocks = vec![
        StatisticBlock {
            statistic: Statistic::PearsonR,
            names: coefficients.names(),
            rows: coefficient_rows,
        },
        StatisticBlock {
            statistic: Statistic::PValue,
            names: p_values.names(),
            rows: numeric_rows(&p_values),
        },
    ];
    if let Some(sample_sizes) = &sample_sizes {
        blocks.push(StatisticBlock {
            statistic: Statistic::SampleSize,
            names: sample_sizes.names(),
            rows: numeric_rows(sample_sizes),
        });
    }

    let report = interleave(table.names(), blocks)?;
    debug!(
        "Built correlation report: {} features, {} rows",
        report.columns.len(),
        report.len()
    );
    Ok(report)
}

/// All rows of one statistic, in feature order.
struct StatisticBlock<'a> {
    statistic: Statistic,
    names: &'a [String],
    rows: Vec<ReportValues>,
}

fn numeric_rows(matrix: &PairwiseMatrix) -> Vec<ReportValues> {
    (0..matrix.n_features())
        .map(|i| ReportValues::Numeric(matrix.row(i)))
        .collect()
}

/// Merge per-statistic blocks into feature groups.
///
/// Every block must be indexed by exactly `names`, in the same order, and
/// hold one row per name; positional alignment is never assumed.
fn interleave(names: &[String], blocks: Vec<StatisticBlock<'_>>) -> Result<CorrelationReport> {
    for block in &blocks {
        if block.names != names {
            return Err(EdaError::IndexMismatch(format!(
                "{} rows indexed by {:?}, expected {:?}",
                block.statistic, block.names, names
            )));
        }
        if block.rows.len() != names.len() {
            return Err(EdaError::IndexMismatch(format!(
                "{} has {} rows for {} features",
                block.statistic,
                block.rows.len(),
                names.len()
            )));
        }
    }

    let mut iters: Vec<(Statistic, std::vec::IntoIter<ReportValues>)> = blocks
        .into_iter()
        .map(|b| (b.statistic, b.rows.into_iter()))
        .collect();

    let mut rows = Vec::with_capacity(names.len() * iters.len());
    for feature in names {
        for (statistic, values) in iters.iter_mut() {
            let Some(values) = values.next() else {
                return Err(EdaError::IndexMismatch(format!(
                    "{} has no row for '{}'",
                    statistic, feature
                )));
            };
            rows.push(ReportRow {
                feature: feature.clone(),
                statistic: *statistic,
                values,
            });
        }
    }

    Ok(CorrelationReport::new(names.to_vec(), rows))
}
