//! Significance markers for correlation coefficients.

use crate::data::PairwiseMatrix;
use crate::error::Result;
use crate::stats::format_float;
use serde::{Deserialize, Serialize};

/// P-value thresholds and their markers, tightest first.
pub const SIGNIFICANCE_LEVELS: [(f64, &str); 3] = [(0.001, "***"), (0.01, "**"), (0.05, "*")];

/// Marker for a p-value.
///
/// Only the tightest threshold the p-value meets applies, so p = 0.0004
/// yields `"***"`. Missing p-values get no marker.
pub fn significance_marker(p_value: f64) -> &'static str {
    SIGNIFICANCE_LEVELS
        .iter()
        .find(|(threshold, _)| p_value <= *threshold)
        .map(|(_, marker)| *marker)
        .unwrap_or("")
}

/// Square matrix of display strings, indexed like a [`PairwiseMatrix`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedMatrix {
    /// Feature names, shared by rows and columns.
    pub names: Vec<String>,
    /// Row-major display cells.
    pub cells: Vec<Vec<String>>,
}

impl AnnotatedMatrix {
    /// Cell at (row, col).
    pub fn get(&self, row: usize, col: usize) -> &str {
        &self.cells[row][col]
    }

    /// Cells of row `i`.
    pub fn row(&self, i: usize) -> &[String] {
        &self.cells[i]
    }
}

/// Append the significance marker of each p-value to the coefficient at
/// the same position.
///
/// Both matrices are expected to be rounded already; markers are derived
/// from the p-values as given.
pub fn annotate(coefficients: &PairwiseMatrix, p_values: &PairwiseMatrix) -> Result<AnnotatedMatrix> {
    coefficients.ensure_same_index(p_values)?;

    let n = coefficients.n_features();
    let cells = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    format!(
                        "{}{}",
                        format_float(coefficients.get(i, j)),
                        significance_marker(p_values.get(i, j))
                    )
                })
                .collect()
        })
        .collect();

    Ok(AnnotatedMatrix {
        names: coefficients.names().to_vec(),
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    #[test]
    fn test_marker_thresholds() {
        assert_eq!(significance_marker(0.0004), "***");
        assert_eq!(significance_marker(0.001), "***");
        assert_eq!(significance_marker(0.005), "**");
        assert_eq!(significance_marker(0.01), "**");
        assert_eq!(significance_marker(0.03), "*");
        assert_eq!(significance_marker(0.05), "*");
        assert_eq!(significance_marker(0.2), "");
        assert_eq!(significance_marker(f64::NAN), "");
    }

    #[test]
    fn test_annotate() {
        let names = vec!["a".to_string(), "b".to_string()];
        let r = PairwiseMatrix::new(
            DMatrix::from_row_slice(2, 2, &[1.0, -0.57, -0.57, 1.0]),
            names.clone(),
        )
        .unwrap();
        let p = PairwiseMatrix::new(
            DMatrix::from_row_slice(2, 2, &[1.0, 0.008, 0.008, 1.0]),
            names,
        )
        .unwrap();

        let annotated = annotate(&r, &p).unwrap();
        assert_eq!(annotated.get(0, 0), "1.0");
        assert_eq!(annotated.get(0, 1), "-0.57**");
        assert_eq!(annotated.row(1), &["-0.57**".to_string(), "1.0".to_string()]);
    }

    #[test]
    fn test_annotate_requires_same_index() {
        let r = PairwiseMatrix::new(DMatrix::from_element(1, 1, 1.0), vec!["a".into()]).unwrap();
        let p = PairwiseMatrix::new(DMatrix::from_element(1, 1, 1.0), vec!["b".into()]).unwrap();
        assert!(annotate(&r, &p).is_err());
    }
}
