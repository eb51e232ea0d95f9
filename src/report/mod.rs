//! SPSS-style correlation reports.
//!
//! Three pairwise matrices (coefficients, p-values, sample sizes) are
//! computed over a [`FeatureTable`](crate::data::FeatureTable), rounded,
//! optionally annotated with significance stars, and interleaved into one
//! [`CorrelationReport`](crate::data::CorrelationReport) grouped by feature.

mod builder;
mod matrices;
mod options;
mod significance;

pub use builder::correlation_report;
pub use matrices::{coefficient_matrix, p_value_matrix, sample_size_matrix};
pub use options::CorrelationOptions;
pub use significance::{annotate, significance_marker, AnnotatedMatrix, SIGNIFICANCE_LEVELS};
