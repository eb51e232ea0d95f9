//! Shapiro-Wilk normality test (Royston 1995 approximation).

use crate::error::{EdaError, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use std::f64::consts::PI;

/// Largest sample the Royston approximation is calibrated for.
pub const MAX_SHAPIRO_N: usize = 5000;

/// Polynomial coefficients for the last weight, in powers of 1/sqrt(n).
const C_LAST: [f64; 6] = [0.0, 0.221157, -0.147981, -2.071190, 4.434685, -2.706056];
/// Polynomial coefficients for the second-to-last weight.
const C_SECOND: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];

/// Result of a Shapiro-Wilk test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapiroResult {
    /// W statistic, in (0, 1].
    pub w: f64,
    /// P-value for H0: the sample comes from a normal distribution.
    pub p_value: f64,
    /// Sample size.
    pub n: usize,
}

fn poly(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Run the Shapiro-Wilk test on a sample of 3 to 5000 finite values.
///
/// # Errors
/// * `InsufficientData` for fewer than 3 observations
/// * `InvalidParameter` for more than [`MAX_SHAPIRO_N`] observations
/// * `ConstantInput` if all values are equal
pub fn shapiro_wilk(data: &[f64]) -> Result<ShapiroResult> {
    let n = data.len();
    if n < 3 {
        return Err(EdaError::InsufficientData {
            required: 3,
            actual: n,
        });
    }
    if n > MAX_SHAPIRO_N {
        return Err(EdaError::InvalidParameter(format!(
            "Shapiro-Wilk supports at most {} observations, got {}",
            MAX_SHAPIRO_N, n
        )));
    }

    let mut x = data.to_vec();
    x.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    if x[n - 1] - x[0] == 0.0 {
        return Err(EdaError::ConstantInput(
            "Shapiro-Wilk is undefined for a constant sample".to_string(),
        ));
    }

    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| EdaError::InvalidParameter(format!("normal distribution: {}", e)))?;
    let weights = weights(n, &normal);

    let mean = x.iter().sum::<f64>() / n as f64;
    let ss = x.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    let numerator: f64 = weights.iter().zip(x.iter()).map(|(a, v)| a * v).sum();
    let w = (numerator * numerator / ss).min(1.0);

    let p_value = p_value(w, n, &normal);
    Ok(ShapiroResult { w, p_value, n })
}

/// Antisymmetric weights a_1..a_n for ordered observations.
fn weights(n: usize, normal: &Normal) -> Vec<f64> {
    if n == 3 {
        let half = 0.5f64.sqrt();
        return vec![-half, 0.0, half];
    }

    let n_f64 = n as f64;
    let m: Vec<f64> = (1..=n)
        .map(|i| normal.inverse_cdf((i as f64 - 0.375) / (n_f64 + 0.25)))
        .collect();
    let mm: f64 = m.iter().map(|v| v * v).sum();
    let u = 1.0 / n_f64.sqrt();

    let mut a = vec![0.0; n];
    let a_last = m[n - 1] / mm.sqrt() + poly(&C_LAST, u);

    let (phi, inner) = if n > 5 {
        let a_second = m[n - 2] / mm.sqrt() + poly(&C_SECOND, u);
        let phi = (mm - 2.0 * m[n - 1].powi(2) - 2.0 * m[n - 2].powi(2))
            / (1.0 - 2.0 * a_last.powi(2) - 2.0 * a_second.powi(2));
        a[n - 2] = a_second;
        a[1] = -a_second;
        (phi, 2..n - 2)
    } else {
        let phi = (mm - 2.0 * m[n - 1].powi(2)) / (1.0 - 2.0 * a_last.powi(2));
        (phi, 1..n - 1)
    };
    a[n - 1] = a_last;
    a[0] = -a_last;

    let scale = phi.sqrt();
    for i in inner {
        a[i] = m[i] / scale;
    }
    a
}

fn p_value(w: f64, n: usize, normal: &Normal) -> f64 {
    if n == 3 {
        let p = (6.0 / PI) * (w.sqrt().asin() - 0.75f64.sqrt().asin());
        return p.clamp(0.0, 1.0);
    }

    let n_f64 = n as f64;
    let y = (1.0 - w).ln();
    let z = if n <= 11 {
        let gamma = -2.273 + 0.459 * n_f64;
        if y >= gamma {
            return 1e-99;
        }
        let w1 = -(gamma - y).ln();
        let mu = poly(&[0.5440, -0.39978, 0.025054, -0.0006714], n_f64);
        let sigma = poly(&[1.3822, -0.77857, 0.062767, -0.0020322], n_f64).exp();
        (w1 - mu) / sigma
    } else {
        let ln_n = n_f64.ln();
        let mu = poly(&[-1.5861, -0.31082, -0.083751, 0.0038915], ln_n);
        let sigma = poly(&[-0.4803, -0.082676, 0.0030302], ln_n).exp();
        (y - mu) / sigma
    };
    normal.sf(z)
}
