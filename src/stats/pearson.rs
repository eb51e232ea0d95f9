//! Pearson correlation test.

use crate::error::{EdaError, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Result of a Pearson correlation test for one pair of variables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PearsonResult {
    /// Correlation coefficient, in [-1, 1].
    pub r: f64,
    /// Two-tailed p-value for H0: rho = 0.
    pub p_value: f64,
    /// Number of observations used.
    pub n: usize,
}

/// Keep only the positions where both `x` and `y` are finite.
pub fn pairwise_complete(x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
    x.iter()
        .zip(y.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .unzip()
}

/// Pearson correlation coefficient and its two-tailed p-value.
///
/// Inputs must already be free of missing values (see
/// [`pairwise_complete`]). The p-value comes from a t-test with n - 2
/// degrees of freedom: t = r * sqrt((n - 2) / (1 - r²)).
///
/// # Errors
/// * `DimensionMismatch` if the slices differ in length
/// * `InsufficientData` with fewer than two observations
/// * `ConstantInput` if either variable has zero variance
pub fn pearson(x: &[f64], y: &[f64]) -> Result<PearsonResult> {
    if x.len() != y.len() {
        return Err(EdaError::DimensionMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    let n = x.len();
    if n < 2 {
        return Err(EdaError::InsufficientData {
            required: 2,
            actual: n,
        });
    }

    let n_f64 = n as f64;
    let mean_x = x.iter().sum::<f64>() / n_f64;
    let mean_y = y.iter().sum::<f64>() / n_f64;

    let mut cov = 0.0;
    let mut ss_x = 0.0;
    let mut ss_y = 0.0;
    for (a, b) in x.iter().zip(y.iter()) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        ss_x += dx * dx;
        ss_y += dy * dy;
    }

    if ss_x == 0.0 || ss_y == 0.0 {
        return Err(EdaError::ConstantInput(
            "correlation is undefined for a constant variable".to_string(),
        ));
    }

    let r = (cov / (ss_x.sqrt() * ss_y.sqrt())).clamp(-1.0, 1.0);

    // Two points always lie on a line.
    if n == 2 {
        return Ok(PearsonResult {
            r: r.signum(),
            p_value: 1.0,
            n,
        });
    }

    let p_value = if r.abs() == 1.0 {
        0.0
    } else {
        let df = n_f64 - 2.0;
        let t = r * (df / (1.0 - r * r)).sqrt();
        let t_dist = StudentsT::new(0.0, 1.0, df)
            .map_err(|e| EdaError::InvalidParameter(format!("t distribution: {}", e)))?;
        (2.0 * t_dist.sf(t.abs())).min(1.0)
    };

    Ok(PearsonResult { r, p_value, n })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perfect_positive() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];
        let result = pearson(&x, &y).unwrap();
        assert_relative_eq!(result.r, 1.0, epsilon = 1e-12);
        assert!(result.p_value < 1e-6);
        assert_eq!(result.n, 5);
    }

    #[test]
    fn test_perfect_negative() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [8.0, 6.0, 4.0, 2.0];
        let result = pearson(&x, &y).unwrap();
        assert_relative_eq!(result.r, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_known_value() {
        // r = 0.8, n = 5 -> t = 0.8 * sqrt(3 / 0.36) = 2.3094, p = 0.1041
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [1.0, 3.0, 2.0, 5.0, 4.0];
        let result = pearson(&x, &y).unwrap();
        assert_relative_eq!(result.r, 0.8, epsilon = 1e-12);
        assert_relative_eq!(result.p_value, 0.1041, epsilon = 1e-3);
    }

    #[test]
    fn test_uncorrelated() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 3.0, 1.0, 2.0];
        let result = pearson(&x, &y).unwrap();
        assert_relative_eq!(result.r, 0.0, epsilon = 1e-12);
        assert_relative_eq!(result.p_value, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_two_points() {
        let result = pearson(&[1.0, 2.0], &[5.0, 3.0]).unwrap();
        assert_eq!(result.r, -1.0);
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn test_single_point_errors() {
        assert!(matches!(
            pearson(&[1.0], &[2.0]),
            Err(EdaError::InsufficientData { required: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_constant_errors() {
        assert!(matches!(
            pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]),
            Err(EdaError::ConstantInput(_))
        ));
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            pearson(&[1.0, 2.0], &[1.0]),
            Err(EdaError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_pairwise_complete() {
        let x = [1.0, f64::NAN, 3.0, 4.0];
        let y = [2.0, 5.0, f64::NAN, 8.0];
        let (a, b) = pairwise_complete(&x, &y);
        assert_eq!(a, vec![1.0, 4.0]);
        assert_eq!(b, vec![2.0, 8.0]);
    }
}
