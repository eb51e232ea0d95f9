//! D'Agostino-Pearson K² omnibus normality test.

use super::moments::{kurtosis, skewness};
use crate::error::{EdaError, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Smallest sample the skewness transform is defined for.
pub const MIN_DAGOSTINO_N: usize = 8;

/// Result of the D'Agostino-Pearson test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DagostinoResult {
    /// K² = Z_skew² + Z_kurt².
    pub statistic: f64,
    /// P-value from a chi-squared distribution with 2 degrees of freedom.
    pub p_value: f64,
    /// Normalized skewness score.
    pub z_skewness: f64,
    /// Normalized kurtosis score.
    pub z_kurtosis: f64,
    /// Sample size.
    pub n: usize,
}

/// Z-score of the sample skewness (D'Agostino 1970).
fn skew_z(g1: f64, n: f64) -> f64 {
    let y = g1 * ((n + 1.0) * (n + 3.0) / (6.0 * (n - 2.0))).sqrt();
    let beta2 = 3.0 * (n * n + 27.0 * n - 70.0) * (n + 1.0) * (n + 3.0)
        / ((n - 2.0) * (n + 5.0) * (n + 7.0) * (n + 9.0));
    let w2 = -1.0 + (2.0 * (beta2 - 1.0)).sqrt();
    let delta = 1.0 / (0.5 * w2.ln()).sqrt();
    let alpha = (2.0 / (w2 - 1.0)).sqrt();
    delta * (y / alpha).asinh()
}

/// Z-score of the sample kurtosis (Anscombe & Glynn 1983).
fn kurtosis_z(b2: f64, n: f64) -> f64 {
    let expected = 3.0 * (n - 1.0) / (n + 1.0);
    let variance = 24.0 * n * (n - 2.0) * (n - 3.0)
        / ((n + 1.0) * (n + 1.0) * (n + 3.0) * (n + 5.0));
    let x = (b2 - expected) / variance.sqrt();
    let sqrt_beta1 = 6.0 * (n * n - 5.0 * n + 2.0) / ((n + 7.0) * (n + 9.0))
        * (6.0 * (n + 3.0) * (n + 5.0) / (n * (n - 2.0) * (n - 3.0))).sqrt();
    let a = 6.0
        + 8.0 / sqrt_beta1 * (2.0 / sqrt_beta1 + (1.0 + 4.0 / (sqrt_beta1 * sqrt_beta1)).sqrt());
    let term1 = 1.0 - 2.0 / (9.0 * a);
    let denom = 1.0 + x * (2.0 / (a - 4.0)).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    let term2 = denom.signum() * ((1.0 - 2.0 / a) / denom.abs()).cbrt();
    (term1 - term2) / (2.0 / (9.0 * a)).sqrt()
}

/// Run the D'Agostino-Pearson test on a sample of finite values.
///
/// # Errors
/// * `InsufficientData` for fewer than [`MIN_DAGOSTINO_N`] observations
/// * `ConstantInput` if all values are equal
pub fn dagostino_pearson(data: &[f64]) -> Result<DagostinoResult> {
    let n = data.len();
    if n < MIN_DAGOSTINO_N {
        return Err(EdaError::InsufficientData {
            required: MIN_DAGOSTINO_N,
            actual: n,
        });
    }

    let g1 = skewness(data);
    let g2 = kurtosis(data);
    if g1.is_nan() || g2.is_nan() {
        return Err(EdaError::ConstantInput(
            "D'Agostino-Pearson is undefined for a constant sample".to_string(),
        ));
    }

    let n_f64 = n as f64;
    let z_skewness = skew_z(g1, n_f64);
    let z_kurtosis = kurtosis_z(g2 + 3.0, n_f64);
    let statistic = z_skewness * z_skewness + z_kurtosis * z_kurtosis;

    let chi2 = ChiSquared::new(2.0)
        .map_err(|e| EdaError::InvalidParameter(format!("chi-squared distribution: {}", e)))?;
    let p_value = chi2.sf(statistic);

    Ok(DagostinoResult {
        statistic,
        p_value,
        z_skewness,
        z_kurtosis,
        n,
    })
}
