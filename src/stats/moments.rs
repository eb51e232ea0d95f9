//! Descriptive moments.

use crate::error::{EdaError, Result};
use serde::{Deserialize, Serialize};

/// Arithmetic mean; `NaN` for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Central moment of order `k` around `mean`, divided by n.
fn central_moment(data: &[f64], mean: f64, k: i32) -> f64 {
    data.iter().map(|x| (x - mean).powi(k)).sum::<f64>() / data.len() as f64
}

/// Sample skewness g1 = m3 / m2^1.5 (biased estimator).
///
/// `NaN` for empty or constant input.
pub fn skewness(data: &[f64]) -> f64 {
    let m = mean(data);
    let m2 = central_moment(data, m, 2);
    let m3 = central_moment(data, m, 3);
    if m2 == 0.0 {
        return f64::NAN;
    }
    m3 / m2.powf(1.5)
}

/// Excess kurtosis g2 = m4 / m2² - 3 (biased estimator).
///
/// `NaN` for empty or constant input.
pub fn kurtosis(data: &[f64]) -> f64 {
    let m = mean(data);
    let m2 = central_moment(data, m, 2);
    let m4 = central_moment(data, m, 4);
    if m2 == 0.0 {
        return f64::NAN;
    }
    m4 / (m2 * m2) - 3.0
}

/// Summary moments of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    /// Number of observations.
    pub n: usize,
    /// Mean.
    pub mean: f64,
    /// Sample variance (n - 1 denominator).
    pub variance: f64,
    /// Skewness (biased g1).
    pub skewness: f64,
    /// Excess kurtosis (biased g2).
    pub kurtosis: f64,
}

impl Moments {
    /// Compute moments of a sample with at least two observations.
    pub fn from_slice(data: &[f64]) -> Result<Self> {
        let n = data.len();
        if n < 2 {
            return Err(EdaError::InsufficientData {
                required: 2,
                actual: n,
            });
        }
        let m = mean(data);
        let variance = data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (n - 1) as f64;
        Ok(Self {
            n,
            mean: m,
            variance,
            skewness: skewness(data),
            kurtosis: kurtosis(data),
        })
    }

    /// Standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_symmetric_sample() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(mean(&data), 3.0);
        assert_relative_eq!(skewness(&data), 0.0, epsilon = 1e-12);
        // m2 = 2, m4 = 6.8 -> 6.8 / 4 - 3 = -1.3
        assert_relative_eq!(kurtosis(&data), -1.3, epsilon = 1e-12);
    }

    #[test]
    fn test_right_skewed_sample() {
        let data = [1.0, 1.0, 1.0, 2.0, 10.0];
        assert!(skewness(&data) > 1.0);
    }

    #[test]
    fn test_constant_sample() {
        let data = [4.0; 6];
        assert!(skewness(&data).is_nan());
        assert!(kurtosis(&data).is_nan());
    }

    #[test]
    fn test_moments_struct() {
        let m = Moments::from_slice(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(m.n, 8);
        assert_relative_eq!(m.mean, 5.0);
        assert_relative_eq!(m.variance, 32.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(m.std_dev(), (32.0f64 / 7.0).sqrt(), epsilon = 1e-12);

        assert!(matches!(
            Moments::from_slice(&[1.0]),
            Err(EdaError::InsufficientData { required: 2, actual: 1 })
        ));
    }
}
