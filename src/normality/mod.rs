//! Normality check combining Shapiro-Wilk and D'Agostino-Pearson tests.
//!
//! The verdict is conservative: a sample is judged not normal as soon as
//! either test rejects normality at the configured significance level.

use crate::error::{EdaError, Result};
use crate::stats::{
    dagostino::MIN_DAGOSTINO_N, dagostino_pearson, shapiro::MAX_SHAPIRO_N, shapiro_wilk,
    DagostinoResult, Moments, Rng, ShapiroResult,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Configuration for the normality check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalityConfig {
    /// Significance level; a p-value below it rejects normality.
    pub alpha: f64,
    /// Observations kept before testing; larger samples are sub-sampled.
    pub max_sample: usize,
    /// Seed for sub-sampling.
    pub seed: u64,
}

impl Default for NormalityConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            max_sample: 4000,
            seed: 42,
        }
    }
}

impl NormalityConfig {
    /// Create default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set significance level.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the sub-sampling cap.
    pub fn with_max_sample(mut self, max_sample: usize) -> Self {
        self.max_sample = max_sample;
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(EdaError::InvalidParameter(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        if self.max_sample < MIN_DAGOSTINO_N || self.max_sample > MAX_SHAPIRO_N {
            return Err(EdaError::InvalidParameter(format!(
                "max_sample must be between {} and {}, got {}",
                MIN_DAGOSTINO_N, MAX_SHAPIRO_N, self.max_sample
            )));
        }
        Ok(())
    }
}

/// Outcome of the normality check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalityAssessment {
    /// Finite observations in the input.
    pub n_total: usize,
    /// Observations actually tested.
    pub n_used: usize,
    /// Shapiro-Wilk result.
    pub shapiro: ShapiroResult,
    /// D'Agostino-Pearson result.
    pub dagostino: DagostinoResult,
    /// Mean of the tested sample.
    pub mean: f64,
    /// Standard deviation of the tested sample.
    pub std_dev: f64,
    /// Skewness of the tested sample.
    pub skewness: f64,
    /// Excess kurtosis of the tested sample.
    pub kurtosis: f64,
    /// Significance level used.
    pub alpha: f64,
    /// Final verdict.
    pub is_normal: bool,
}

impl NormalityAssessment {
    /// Human-readable verdict.
    pub fn judgment(&self) -> String {
        if self.is_normal {
            format!(
                "Sample looks normal (Shapiro-Wilk p = {:.4}, D'Agostino-Pearson p = {:.4}, alpha = {})",
                self.shapiro.p_value, self.dagostino.p_value, self.alpha
            )
        } else {
            format!(
                "Sample does not look normal (Shapiro-Wilk p = {:.4}, D'Agostino-Pearson p = {:.4}, alpha = {})",
                self.shapiro.p_value, self.dagostino.p_value, self.alpha
            )
        }
    }
}

impl std::fmt::Display for NormalityAssessment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Normality Check")?;
        writeln!(f, "  Observations:        {} (tested {})", self.n_total, self.n_used)?;
        writeln!(
            f,
            "  Shapiro-Wilk:        W = {:.4}, p = {:.4}",
            self.shapiro.w, self.shapiro.p_value
        )?;
        writeln!(
            f,
            "  D'Agostino-Pearson:  K2 = {:.4}, p = {:.4}",
            self.dagostino.statistic, self.dagostino.p_value
        )?;
        writeln!(f, "  Mean:                {:.4}", self.mean)?;
        writeln!(f, "  Std. deviation:      {:.4}", self.std_dev)?;
        writeln!(f, "  Skewness:            {:.4}", self.skewness)?;
        writeln!(f, "  Excess kurtosis:     {:.4}", self.kurtosis)?;
        writeln!(f, "  Verdict:             {}", if self.is_normal { "normal" } else { "not normal" })?;
        Ok(())
    }
}

/// Run both normality tests and combine them.
///
/// Non-finite observations are dropped. Samples larger than
/// `config.max_sample` are reduced to that size with a seeded random draw.
///
/// # Errors
/// * `InvalidParameter` for an invalid configuration
/// * `InsufficientData` when fewer than 8 finite observations remain
/// * `ConstantInput` for a constant sample
pub fn normality_check(sample: &[f64], config: &NormalityConfig) -> Result<NormalityAssessment> {
    config.validate()?;

    let finite: Vec<f64> = sample.iter().copied().filter(|v| v.is_finite()).collect();
    let n_total = finite.len();
    if n_total < MIN_DAGOSTINO_N {
        return Err(EdaError::InsufficientData {
            required: MIN_DAGOSTINO_N,
            actual: n_total,
        });
    }

    let used = if n_total > config.max_sample {
        warn!(
            "Sub-sampling {} of {} observations for normality testing",
            config.max_sample, n_total
        );
        let mut rng = Rng::new(config.seed);
        rng.sample_indices(n_total, config.max_sample)
            .into_iter()
            .map(|i| finite[i])
            .collect()
    } else {
        finite
    };
    debug!("Testing normality on {} observations", used.len());

    let shapiro = shapiro_wilk(&used)?;
    let dagostino = dagostino_pearson(&used)?;
    let moments = Moments::from_slice(&used)?;
    let rejected = shapiro.p_value < config.alpha || dagostino.p_value < config.alpha;

    Ok(NormalityAssessment {
        n_total,
        n_used: moments.n,
        shapiro,
        dagostino,
        mean: moments.mean,
        std_dev: moments.std_dev(),
        skewness: moments.skewness,
        kurtosis: moments.kurtosis,
        alpha: config.alpha,
        is_normal: !rejected,
    })
}

/// Judge whether a sample is normal with the default configuration.
///
/// The verdict is logged at info level, followed by skewness and kurtosis
/// when the sample is judged normal.
pub fn is_normal(sample: &[f64]) -> Result<bool> {
    is_normal_with(sample, &NormalityConfig::default())
}

/// [`is_normal`] with an explicit configuration.
pub fn is_normal_with(sample: &[f64], config: &NormalityConfig) -> Result<bool> {
    let assessment = normality_check(sample, config)?;
    info!("{}", assessment.judgment());
    if assessment.is_normal {
        info!(
            "Skewness: {:.4}, excess kurtosis: {:.4}",
            assessment.skewness, assessment.kurtosis
        );
    }
    Ok(assessment.is_normal)
}
