//! Statistical primitives used by the report, chart and normality helpers.
//!
//! Distribution functions come from `statrs`; the test statistics
//! themselves are computed here.

pub mod dagostino;
pub mod moments;
pub mod pearson;
pub mod rng;
pub mod shapiro;

pub use dagostino::{dagostino_pearson, DagostinoResult};
pub use moments::{kurtosis, mean, skewness, Moments};
pub use pearson::{pairwise_complete, pearson, PearsonResult};
pub use rng::Rng;
pub use shapiro::{shapiro_wilk, ShapiroResult};

/// Round `value` to `decimals` places, resolving ties to the even neighbour.
///
/// Missing and infinite values pass through unchanged, as do values too
/// large to scale by `10^decimals`.
pub fn round_decimals(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round_ties_even() / factor
}

/// Shortest display form of a float that always keeps a fractional part.
///
/// `1.0` renders as `"1.0"`, `0.25` as `"0.25"` and `NaN` as `"nan"`.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value == f64::INFINITY {
        "inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_decimals() {
        assert_eq!(round_decimals(0.86643, 2), 0.87);
        assert_eq!(round_decimals(0.86643, 3), 0.866);
        assert_eq!(round_decimals(-0.4449, 1), -0.4);
        assert_eq!(round_decimals(4.0, 3), 4.0);
        assert_eq!(round_decimals(2.5, 0), 2.0);
        assert_eq!(round_decimals(3.5, 0), 4.0);
        assert!(round_decimals(f64::NAN, 3).is_nan());
    }

    #[test]
    fn test_round_decimals_high_precision() {
        assert_eq!(round_decimals(0.125, 16), 0.125);
        assert_eq!(round_decimals(0.86643, 400), 0.86643);
        assert_eq!(round_decimals(0.0, 400), 0.0);
        assert_eq!(round_decimals(-2.5, u32::MAX), -2.5);
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(-1.0), "-1.0");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(0.87), "0.87");
        assert_eq!(format_float(-0.123), "-0.123");
        assert_eq!(format_float(5.0), "5.0");
        assert_eq!(format_float(f64::NAN), "nan");
    }
}
