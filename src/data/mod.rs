//! Data structures for exploratory analysis.

mod feature_table;
mod matrix;
mod report;

pub use feature_table::FeatureTable;
pub use matrix::PairwiseMatrix;
pub use report::{CorrelationReport, ReportRow, ReportValues, Statistic};
