//! Score-transformation algebra.
//!
//! A modifier is a pure transfer function mapping a raw measurement to a
//! normalized desirability. Modifiers are constructed once per scoring
//! context and reused for every candidate; parameters are validated at
//! construction, never at call time, and application is stateless.

use serde::{Deserialize, Serialize};
use synthyx_common::{Result, SynthyxError};

/// A named pure transfer function with parameters fixed at construction.
///
/// Interpolation slopes and logistic steepness are precomputed by the
/// constructors, so `apply` is a straight formula evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScoreModifier {
    /// y = slope·x. Identity when slope is 1.
    Linear { slope: f64 },
    /// y = 1 − coefficient·(target − x)². Peak 1.0 at the target,
    /// unbounded below.
    Squared { target: f64, coefficient: f64 },
    /// y = 1 − |target − x|. Peak 1.0 at the target, unbounded below.
    Absolute { target: f64 },
    /// Gaussian bell: y = exp(−0.5·((x − mu)/sigma)²). Range (0, 1],
    /// peak at mu.
    Gaussian { mu: f64, sigma: f64 },
    /// Half bell: flat 1.0 for x ≤ mu, Gaussian decay above.
    MinGaussian { mu: f64, sigma: f64 },
    /// Half bell: flat 1.0 for x ≥ mu, Gaussian decay below.
    MaxGaussian { mu: f64, sigma: f64 },
    /// Linear interpolation between (lower_x, low_score) and
    /// (upper_x, high_score), clamped to [low_score, high_score]. The slope
    /// sign follows the ordering of upper_x vs lower_x.
    Clipped {
        upper_x: f64,
        lower_x: f64,
        high_score: f64,
        low_score: f64,
        slope: f64,
        intercept: f64,
    },
    /// Logistic counterpart of `Clipped` with midpoint (upper_x + lower_x)/2
    /// and steepness 4/(upper_x − lower_x); approaches the bounds
    /// asymptotically without reaching them.
    SmoothClipped {
        upper_x: f64,
        lower_x: f64,
        high_score: f64,
        low_score: f64,
        k: f64,
        middle_x: f64,
    },
    /// y = min(x, threshold)/threshold; saturates at 1.0 for x ≥ threshold.
    ThresholdedLinear { threshold: f64 },
    /// Applies the contained modifiers left to right; the empty chain is
    /// the identity. The sequence is immutable after construction.
    Chained(Vec<ScoreModifier>),
}

impl ScoreModifier {
    pub fn linear(slope: f64) -> Self {
        ScoreModifier::Linear { slope }
    }

    /// The do-nothing modifier, `Linear { slope: 1.0 }`.
    pub fn identity() -> Self {
        Self::linear(1.0)
    }

    pub fn squared(target: f64, coefficient: f64) -> Self {
        ScoreModifier::Squared {
            target,
            coefficient,
        }
    }

    pub fn absolute(target: f64) -> Self {
        ScoreModifier::Absolute { target }
    }

    pub fn gaussian(mu: f64, sigma: f64) -> Result<Self> {
        validate_sigma(sigma)?;
        Ok(ScoreModifier::Gaussian { mu, sigma })
    }

    pub fn min_gaussian(mu: f64, sigma: f64) -> Result<Self> {
        validate_sigma(sigma)?;
        Ok(ScoreModifier::MinGaussian { mu, sigma })
    }

    pub fn max_gaussian(mu: f64, sigma: f64) -> Result<Self> {
        validate_sigma(sigma)?;
        Ok(ScoreModifier::MaxGaussian { mu, sigma })
    }

    pub fn clipped(upper_x: f64, lower_x: f64, high_score: f64, low_score: f64) -> Result<Self> {
        validate_clip_bounds(upper_x, lower_x, high_score, low_score)?;
        let slope = (high_score - low_score) / (upper_x - lower_x);
        let intercept = high_score - slope * upper_x;
        Ok(ScoreModifier::Clipped {
            upper_x,
            lower_x,
            high_score,
            low_score,
            slope,
            intercept,
        })
    }

    /// `Clipped` with the conventional defaults: lower_x = 0, scores in
    /// [0, 1]. The usual shape for similarity thresholds.
    pub fn clipped_upper(upper_x: f64) -> Result<Self> {
        Self::clipped(upper_x, 0.0, 1.0, 0.0)
    }

    pub fn smooth_clipped(
        upper_x: f64,
        lower_x: f64,
        high_score: f64,
        low_score: f64,
    ) -> Result<Self> {
        validate_clip_bounds(upper_x, lower_x, high_score, low_score)?;
        // A standard logistic has slope 0.25 at its midpoint; k rescales it
        // to match the Clipped interpolation slope.
        let k = 4.0 / (upper_x - lower_x);
        let middle_x = (upper_x + lower_x) / 2.0;
        Ok(ScoreModifier::SmoothClipped {
            upper_x,
            lower_x,
            high_score,
            low_score,
            k,
            middle_x,
        })
    }

    pub fn thresholded(threshold: f64) -> Result<Self> {
        if threshold <= 0.0 {
            return Err(SynthyxError::Configuration(format!(
                "thresholded modifier requires threshold > 0, got {}",
                threshold
            )));
        }
        Ok(ScoreModifier::ThresholdedLinear { threshold })
    }

    pub fn chained(modifiers: Vec<ScoreModifier>) -> Self {
        ScoreModifier::Chained(modifiers)
    }

    /// Apply the transfer function to one raw measurement.
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            ScoreModifier::Linear { slope } => slope * x,
            ScoreModifier::Squared {
                target,
                coefficient,
            } => 1.0 - coefficient * (target - x).powi(2),
            ScoreModifier::Absolute { target } => 1.0 - (target - x).abs(),
            ScoreModifier::Gaussian { mu, sigma } => gaussian_bell(x, *mu, *sigma),
            ScoreModifier::MinGaussian { mu, sigma } => gaussian_bell(x.max(*mu), *mu, *sigma),
            ScoreModifier::MaxGaussian { mu, sigma } => gaussian_bell(x.min(*mu), *mu, *sigma),
            ScoreModifier::Clipped {
                high_score,
                low_score,
                slope,
                intercept,
                ..
            } => (slope * x + intercept).clamp(*low_score, *high_score),
            ScoreModifier::SmoothClipped {
                high_score,
                low_score,
                k,
                middle_x,
                ..
            } => low_score + (high_score - low_score) / (1.0 + (-k * (x - middle_x)).exp()),
            ScoreModifier::ThresholdedLinear { threshold } => x.min(*threshold) / threshold,
            ScoreModifier::Chained(modifiers) => {
                modifiers.iter().fold(x, |score, m| m.apply(score))
            }
        }
    }

    /// Element-wise application over a batch of raw measurements.
    pub fn apply_slice(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.apply(x)).collect()
    }
}

fn gaussian_bell(x: f64, mu: f64, sigma: f64) -> f64 {
    (-0.5 * ((x - mu) / sigma).powi(2)).exp()
}

fn validate_sigma(sigma: f64) -> Result<()> {
    if sigma <= 0.0 {
        return Err(SynthyxError::Configuration(format!(
            "gaussian modifier requires sigma > 0, got {}",
            sigma
        )));
    }
    Ok(())
}

fn validate_clip_bounds(upper_x: f64, lower_x: f64, high_score: f64, low_score: f64) -> Result<()> {
    if low_score >= high_score {
        return Err(SynthyxError::Configuration(format!(
            "clipped modifier requires low_score < high_score, got {} >= {}",
            low_score, high_score
        )));
    }
    if upper_x == lower_x {
        return Err(SynthyxError::Configuration(
            "clipped modifier requires upper_x != lower_x".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_identity() {
        let m = ScoreModifier::identity();
        for x in [-3.5, 0.0, 0.25, 100.0] {
            assert_eq!(m.apply(x), x);
        }
    }

    #[test]
    fn test_squared_and_absolute_peak_at_target() {
        let squared = ScoreModifier::squared(2.0, 0.5);
        assert_eq!(squared.apply(2.0), 1.0);
        assert!((squared.apply(4.0) - (1.0 - 0.5 * 4.0)).abs() < 1e-12);

        let absolute = ScoreModifier::absolute(2.0);
        assert_eq!(absolute.apply(2.0), 1.0);
        assert!((absolute.apply(4.5) - (1.0 - 2.5)).abs() < 1e-12);
    }

    #[test]
    fn test_gaussian_is_one_at_mu_and_decays() {
        let m = ScoreModifier::gaussian(5.0, 2.0).unwrap();
        assert_eq!(m.apply(5.0), 1.0);
        let mut previous = 1.0;
        for step in 1..10 {
            let score = m.apply(5.0 + step as f64 * 0.5);
            assert!(score < previous);
            previous = score;
        }
        // symmetric about mu
        assert!((m.apply(3.0) - m.apply(7.0)).abs() < 1e-12);
    }

    #[test]
    fn test_min_gaussian_flat_below_mu() {
        let m = ScoreModifier::min_gaussian(1.0, 1.0).unwrap();
        assert_eq!(m.apply(-5.0), 1.0);
        assert_eq!(m.apply(1.0), 1.0);
        assert!(m.apply(2.0) < 1.0);
    }

    #[test]
    fn test_max_gaussian_flat_above_mu() {
        let m = ScoreModifier::max_gaussian(100.0, 10.0).unwrap();
        assert_eq!(m.apply(150.0), 1.0);
        assert_eq!(m.apply(100.0), 1.0);
        assert!(m.apply(80.0) < 1.0);
    }

    #[test]
    fn test_clipped_interpolates_and_clamps() {
        let m = ScoreModifier::clipped(1.0, 0.0, 1.0, 0.0).unwrap();
        assert!((m.apply(0.5) - 0.5).abs() < 1e-12);
        assert_eq!(m.apply(2.0), 1.0);
        assert_eq!(m.apply(-1.0), 0.0);
    }

    #[test]
    fn test_clipped_supports_descending_slope() {
        // upper_x < lower_x: maximal score up to 1, minimal from 3
        let m = ScoreModifier::clipped(1.0, 3.0, 1.0, 0.0).unwrap();
        assert_eq!(m.apply(0.0), 1.0);
        assert!((m.apply(2.0) - 0.5).abs() < 1e-12);
        assert_eq!(m.apply(5.0), 0.0);
    }

    #[test]
    fn test_smooth_clipped_midpoint_and_asymptotes() {
        let m = ScoreModifier::smooth_clipped(1.0, 0.0, 1.0, 0.0).unwrap();
        assert!((m.apply(0.5) - 0.5).abs() < 1e-12);
        assert!(m.apply(50.0) > 0.999 && m.apply(50.0) < 1.0);
        assert!(m.apply(-50.0) < 0.001 && m.apply(-50.0) > 0.0);
    }

    #[test]
    fn test_thresholded_linear() {
        let m = ScoreModifier::thresholded(10.0).unwrap();
        assert!((m.apply(5.0) - 0.5).abs() < 1e-12);
        assert_eq!(m.apply(20.0), 1.0);
        assert_eq!(m.apply(10.0), 1.0);
    }

    #[test]
    fn test_chained_composes_left_to_right() {
        let m = ScoreModifier::chained(vec![
            ScoreModifier::linear(2.0),
            ScoreModifier::thresholded(4.0).unwrap(),
        ]);
        // 3 -> 6 -> min(6,4)/4 = 1.0
        assert_eq!(m.apply(3.0), 1.0);
        // 1 -> 2 -> 0.5
        assert!((m.apply(1.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_chain_is_identity() {
        let m = ScoreModifier::chained(vec![]);
        for x in [-2.0, 0.0, 1.0, 1e9] {
            assert_eq!(m.apply(x), x);
        }
    }

    #[test]
    fn test_chaining_identity_preserves_any_modifier() {
        let gaussian = ScoreModifier::gaussian(0.0, 1.0).unwrap();
        let chained = ScoreModifier::chained(vec![ScoreModifier::identity(), gaussian.clone()]);
        for x in [-2.0, -0.5, 0.0, 0.5, 2.0] {
            assert_eq!(chained.apply(x), gaussian.apply(x));
        }
    }

    #[test]
    fn test_apply_slice_matches_scalar() {
        let m = ScoreModifier::gaussian(1.0, 1.0).unwrap();
        let xs = [0.0, 1.0, 2.0];
        let ys = m.apply_slice(&xs);
        assert_eq!(ys.len(), 3);
        for (x, y) in xs.iter().zip(&ys) {
            assert_eq!(m.apply(*x), *y);
        }
    }

    #[test]
    fn test_invalid_parameters_are_configuration_errors() {
        assert!(matches!(
            ScoreModifier::clipped(1.0, 0.0, 0.0, 1.0),
            Err(SynthyxError::Configuration(_))
        ));
        assert!(matches!(
            ScoreModifier::clipped(1.0, 1.0, 1.0, 0.0),
            Err(SynthyxError::Configuration(_))
        ));
        assert!(matches!(
            ScoreModifier::smooth_clipped(1.0, 0.0, 0.5, 0.5),
            Err(SynthyxError::Configuration(_))
        ));
        assert!(ScoreModifier::gaussian(0.0, 0.0).is_err());
        assert!(ScoreModifier::min_gaussian(0.0, -1.0).is_err());
        assert!(ScoreModifier::thresholded(0.0).is_err());
    }
}
