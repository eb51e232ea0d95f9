//! Composable Exploratory Data Analysis (EDA) Library
//!
//! Small, stateless helpers for a first look at tabular numeric data.
//!
//! # Overview
//!
//! - **data**: Core data structures (FeatureTable, PairwiseMatrix, CorrelationReport)
//! - **stats**: Statistical primitives (Pearson test, moments, normality tests)
//! - **report**: SPSS-style correlation reports with p-values and sample sizes
//! - **chart**: Pie charts rendered to SVG
//! - **normality**: Combined Shapiro-Wilk / D'Agostino-Pearson normality check
//! - **config**: YAML/JSON configuration for all helpers
//!
//! # Example
//!
//! ```no_run
//! use composable_eda::prelude::*;
//!
//! let table = FeatureTable::from_csv("measurements.csv").unwrap();
//!
//! let options = CorrelationOptions::new().with_significance(true).with_decimals(2);
//! let report = correlation_report(&table, &options).unwrap();
//! println!("{}", report);
//!
//! let normal = is_normal(table.column("height").unwrap()).unwrap();
//! ```

pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod normality;
pub mod report;
pub mod stats;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::chart::{pie, PieChart, PieData, PieOptions, Slice, Wedge};
    pub use crate::config::EdaConfig;
    pub use crate::data::{
        CorrelationReport, FeatureTable, PairwiseMatrix, ReportRow, ReportValues, Statistic,
    };
    pub use crate::error::{EdaError, Result};
    pub use crate::normality::{
        is_normal, is_normal_with, normality_check, NormalityAssessment, NormalityConfig,
    };
    pub use crate::report::{
        annotate, coefficient_matrix, correlation_report, p_value_matrix, sample_size_matrix,
        significance_marker, AnnotatedMatrix, CorrelationOptions,
    };
    pub use crate::stats::{
        dagostino_pearson, pearson, shapiro_wilk, DagostinoResult, Moments, PearsonResult,
        ShapiroResult,
    };
}
