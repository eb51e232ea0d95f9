//! Pairwise statistic matrices over a feature table.

use crate::data::{FeatureTable, PairwiseMatrix};
use crate::error::Result;
use crate::stats::{pairwise_complete, pearson};
use log::debug;

/// Evaluate `statistic` for every pair of features.
///
/// Only pairs with i <= j are evaluated and mirrored. A pair without any
/// pairwise-complete observation is missing; a feature paired with itself
/// takes the identity value 1.0 without evaluating `statistic`.
fn pairwise_matrix<F>(table: &FeatureTable, mut statistic: F) -> Result<PairwiseMatrix>
where
    F: FnMut(&[f64], &[f64]) -> Result<f64>,
{
    let n = table.n_features();
    let mut matrix = PairwiseMatrix::missing(table.names().to_vec());

    for i in 0..n {
        for j in i..n {
            let (x, y) = pairwise_complete(table.column_at(i), table.column_at(j));
            let value = if x.is_empty() {
                f64::NAN
            } else if i == j {
                1.0
            } else {
                statistic(&x, &y)?
            };
            matrix.set_symmetric(i, j, value);
        }
    }

    Ok(matrix)
}

/// Pearson correlation coefficient for every pair of features.
///
/// Errors from the correlation test (too few observations, constant
/// feature) are returned unchanged.
pub fn coefficient_matrix(table: &FeatureTable) -> Result<PairwiseMatrix> {
    debug!("Computing coefficient matrix for {} features", table.n_features());
    pairwise_matrix(table, |x, y| pearson(x, y).map(|r| r.r))
}

/// Two-tailed p-value of the Pearson test for every pair of features.
pub fn p_value_matrix(table: &FeatureTable) -> Result<PairwiseMatrix> {
    debug!("Computing p-value matrix for {} features", table.n_features());
    pairwise_matrix(table, |x, y| pearson(x, y).map(|r| r.p_value))
}

/// Number of pairwise-complete observations for every pair of features.
///
/// A count of exactly 1 cannot support a correlation and is reported as
/// missing. The diagonal is therefore always missing.
pub fn sample_size_matrix(table: &FeatureTable) -> Result<PairwiseMatrix> {
    debug!("Computing sample-size matrix for {} features", table.n_features());
    let counts = pairwise_matrix(table, |x, _| Ok(x.len() as f64))?;
    Ok(counts.map(|n| if n == 1.0 { f64::NAN } else { n }))
}
