//! Square matrices indexed by feature name on both axes.

use crate::error::{EdaError, Result};
use crate::stats::round_decimals;
use nalgebra::DMatrix;

/// A square matrix of pairwise statistics between features.
///
/// Row `i` and column `i` both refer to `names[i]`. Missing cells are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseMatrix {
    /// Cell values (features × features).
    values: DMatrix<f64>,
    /// Feature names, shared by rows and columns.
    names: Vec<String>,
}

impl PairwiseMatrix {
    /// Create a matrix from values and the feature index.
    pub fn new(values: DMatrix<f64>, names: Vec<String>) -> Result<Self> {
        let (nrows, ncols) = values.shape();
        if nrows != ncols {
            return Err(EdaError::DimensionMismatch {
                expected: nrows,
                actual: ncols,
            });
        }
        if nrows != names.len() {
            return Err(EdaError::DimensionMismatch {
                expected: nrows,
                actual: names.len(),
            });
        }
        Ok(Self { values, names })
    }

    /// Matrix of the given size filled with `NaN`.
    pub(crate) fn missing(names: Vec<String>) -> Self {
        let n = names.len();
        Self {
            values: DMatrix::from_element(n, n, f64::NAN),
            names,
        }
    }

    /// Set a cell and its mirror.
    pub(crate) fn set_symmetric(&mut self, i: usize, j: usize, value: f64) {
        self.values[(i, j)] = value;
        self.values[(j, i)] = value;
    }

    /// Number of features on each axis.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.names.len()
    }

    /// Feature names.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Cell at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[(row, col)]
    }

    /// Cell looked up by feature names.
    pub fn get_by_name(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.names.iter().position(|n| n == row)?;
        let j = self.names.iter().position(|n| n == col)?;
        Some(self.values[(i, j)])
    }

    /// Values of row `i` in column order.
    pub fn row(&self, i: usize) -> Vec<f64> {
        self.values.row(i).iter().copied().collect()
    }

    /// Apply `f` to every cell.
    pub fn map<F: FnMut(f64) -> f64>(&self, f: F) -> Self {
        Self {
            values: self.values.map(f),
            names: self.names.clone(),
        }
    }

    /// Round every cell to `decimals` places, ties to even.
    pub fn rounded(&self, decimals: u32) -> Self {
        self.map(|v| round_decimals(v, decimals))
    }

    /// Check symmetry, treating two missing cells as equal.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        let n = self.n_features();
        (0..n).all(|i| {
            (i + 1..n).all(|j| {
                let (a, b) = (self.values[(i, j)], self.values[(j, i)]);
                (a.is_nan() && b.is_nan()) || (a - b).abs() <= tolerance
            })
        })
    }

    /// Ensure `other` is indexed by the same features in the same order.
    pub fn ensure_same_index(&self, other: &PairwiseMatrix) -> Result<()> {
        if self.names != other.names {
            return Err(EdaError::IndexMismatch(format!(
                "{:?} vs {:?}",
                self.names, other.names
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for PairwiseMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self
            .names
            .iter()
            .map(|n| n.chars().count())
            .max()
            .unwrap_or(0)
            .max(8);

        write!(f, "{:width$}", "")?;
        for name in &self.names {
            write!(f, "  {:>width$}", name)?;
        }
        writeln!(f)?;

        for (i, name) in self.names.iter().enumerate() {
            write!(f, "{:width$}", name)?;
            for j in 0..self.n_features() {
                write!(f, "  {:>width$}", self.values[(i, j)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
