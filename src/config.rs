//! Serializable configuration for all helpers.

use crate::chart::PieOptions;
use crate::error::{EdaError, Result};
use crate::normality::NormalityConfig;
use crate::report::CorrelationOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options for every helper, loadable from YAML or JSON.
///
/// Missing sections and fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EdaConfig {
    /// Correlation report options.
    pub correlation: CorrelationOptions,
    /// Pie chart options.
    pub pie: PieOptions,
    /// Normality check options.
    pub normality: NormalityConfig,
}

impl EdaConfig {
    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(EdaError::from)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(EdaError::from)
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(EdaError::from)
    }

    /// Save to pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(EdaError::from)
    }

    /// Load from a file, choosing the format by extension.
    ///
    /// `.json` files are read as JSON; anything else as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        if is_json(path) {
            Self::from_json(&text)
        } else {
            Self::from_yaml(&text)
        }
    }

    /// Write to a file, choosing the format by extension.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = if is_json(path) {
            self.to_json()?
        } else {
            self.to_yaml()?
        };
        fs::write(path, text)?;
        Ok(())
    }

    /// Validate parameter ranges of every section that has them.
    pub fn validate(&self) -> Result<()> {
        self.normality.validate()?;
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_yaml() {
        let yaml = "correlation:\n  significance: true\n  decimals: 2\npie:\n  title: Species\n";
        let config = EdaConfig::from_yaml(yaml).unwrap();
        assert!(config.correlation.significance);
        assert_eq!(config.correlation.decimals, 2);
        assert!(config.correlation.sample_size);
        assert_eq!(config.pie.title, "Species");
        assert!(config.pie.explode);
        assert_eq!(config.normality, NormalityConfig::default());
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = EdaConfig::from_json("{}").unwrap();
        assert_eq!(config, EdaConfig::default());
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut config = EdaConfig::default();
        config.pie.slices = Some(5);
        config.normality.alpha = 0.01;
        let parsed = EdaConfig::from_yaml(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_file_dispatch() {
        let dir = tempdir().unwrap();
        let mut config = EdaConfig::default();
        config.correlation.sample_size = false;

        let json_path = dir.path().join("eda.json");
        config.to_file(&json_path).unwrap();
        assert!(fs::read_to_string(&json_path).unwrap().trim_start().starts_with('{'));
        assert_eq!(EdaConfig::from_file(&json_path).unwrap(), config);

        let yaml_path = dir.path().join("eda.yaml");
        config.to_file(&yaml_path).unwrap();
        assert_eq!(EdaConfig::from_file(&yaml_path).unwrap(), config);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            EdaConfig::from_yaml("correlation: [1, 2"),
            Err(EdaError::Yaml(_))
        ));
    }
}
