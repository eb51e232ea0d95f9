//! Options for building a correlation report.

use serde::{Deserialize, Serialize};

/// Options controlling the correlation report layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationOptions {
    /// Append significance stars to the coefficient cells.
    pub significance: bool,
    /// Decimal places kept for every statistic.
    pub decimals: u32,
    /// Include the sample-size row in each group.
    pub sample_size: bool,
}

impl Default for CorrelationOptions {
    fn default() -> Self {
        Self {
            significance: false,
            decimals: 3,
            sample_size: true,
        }
    }
}

impl CorrelationOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle significance markers.
    pub fn with_significance(mut self, significance: bool) -> Self {
        self.significance = significance;
        self
    }

    /// Set rounding precision.
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    /// Toggle the sample-size row.
    pub fn with_sample_size(mut self, sample_size: bool) -> Self {
        self.sample_size = sample_size;
        self
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CorrelationOptions::default();
        assert!(!options.significance);
        assert_eq!(options.decimals, 3);
        assert!(options.sample_size);
    }

    #[test]
    fn test_builder() {
        let options = CorrelationOptions::new()
            .with_significance(true)
            .with_decimals(2)
            .with_sample_size(false);
        assert!(options.significance);
        assert_eq!(options.decimals, 2);
        assert!(!options.sample_size);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let options: CorrelationOptions = serde_yaml::from_str("significance: true").unwrap();
        assert!(options.significance);
        assert_eq!(options.decimals, 3);
        assert!(options.sample_size);
    }
}
