//! Weighted least squares with inverse squared-residual weights

use crate::ols::{estimate, DEFAULT_CONDITION_THRESHOLD};
use crate::types::{EstimationMethod, RegressionResult};
use econ_core::{Error, Result};
use tracing::{debug, instrument, warn};

/// Bivariate WLS estimator
///
/// Built from the residuals of a prior OLS fit with weights `w_i = 1/e_i²`.
/// The OLS result is only read, never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedLeastSquares {
    weights: Vec<f64>,
    warnings: Vec<String>,
    condition_threshold: f64,
}

impl WeightedLeastSquares {
    /// Derive weights from OLS residuals
    ///
    /// Residuals that are exactly zero would give infinite weight. They are
    /// floored to the smallest non-zero squared residual and the adjustment is
    /// recorded as a warning on the result.
    pub fn from_residuals(residuals: &[f64]) -> Result<Self> {
        econ_core::utils::check_finite(residuals, "OLS residuals")?;

        let squared: Vec<f64> = residuals.iter().map(|e| e * e).collect();
        let floor = squared
            .iter()
            .copied()
            .filter(|&s| s > 0.0)
            .fold(f64::INFINITY, f64::min);
        if !floor.is_finite() {
            return Err(Error::degenerate(
                "WLS weights",
                "every OLS residual is zero",
            ));
        }

        let zero_count = squared.iter().filter(|&&s| s == 0.0).count();
        let mut warnings = Vec::new();
        if zero_count > 0 {
            let message = format!(
                "{zero_count} zero residual(s) floored to the smallest non-zero squared residual ({floor:.3e}) before weighting"
            );
            warn!("{message}");
            warnings.push(message);
        }

        let weights = squared.iter().map(|&s| 1.0 / s.max(floor)).collect();
        Ok(Self {
            weights,
            warnings,
            condition_threshold: DEFAULT_CONDITION_THRESHOLD,
        })
    }

    /// Use explicit weights, which must be finite and positive
    pub fn from_weights(weights: Vec<f64>) -> Result<Self> {
        if let Some(pos) = weights.iter().position(|w| !(w.is_finite() && *w > 0.0)) {
            return Err(Error::InvalidParameter(format!(
                "weight at position {pos} must be finite and positive, got {}",
                weights[pos]
            )));
        }
        Ok(Self {
            weights,
            warnings: Vec::new(),
            condition_threshold: DEFAULT_CONDITION_THRESHOLD,
        })
    }

    pub fn with_condition_threshold(mut self, threshold: f64) -> Self {
        self.condition_threshold = threshold;
        self
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[instrument(skip_all, fields(n = x.len()))]
    pub fn fit(&self, x: &[f64], y: &[f64]) -> Result<RegressionResult> {
        let result = estimate(
            x,
            y,
            Some(&self.weights),
            self.condition_threshold,
            EstimationMethod::Weighted,
            self.warnings.clone(),
        )?;
        debug!(
            intercept = result.intercept,
            slope = result.slope,
            r_squared = result.r_squared,
            "WLS fitted"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrdinaryLeastSquares;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    #[test]
    fn test_weights_from_residuals() {
        let wls = WeightedLeastSquares::from_residuals(&[0.5, -2.0, 1.0]).unwrap();
        assert_eq!(wls.weights(), &[4.0, 0.25, 1.0]);
        assert!(wls.warnings.is_empty());
    }

    #[test]
    fn test_zero_residual_is_floored_with_warning() {
        let wls = WeightedLeastSquares::from_residuals(&[0.0, 0.5, -1.0, 0.0]).unwrap();
        assert_eq!(wls.weights(), &[4.0, 4.0, 1.0, 4.0]);

        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [1.0, 2.5, 2.0, 4.0];
        let r = wls.fit(&x, &y).unwrap();
        assert_eq!(r.warnings.len(), 1);
        assert!(r.warnings[0].starts_with("2 zero residual(s)"));
    }

    #[test]
    fn test_all_zero_residuals_is_degenerate() {
        assert!(matches!(
            WeightedLeastSquares::from_residuals(&[0.0, 0.0, 0.0]),
            Err(Error::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_unit_weights_match_ols() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 5.0];
        let ols = OrdinaryLeastSquares::new().fit(&x, &y).unwrap();
        let wls = WeightedLeastSquares::from_weights(vec![1.0; 5])
            .unwrap()
            .fit(&x, &y)
            .unwrap();

        assert_eq!(wls.method, EstimationMethod::Weighted);
        assert_abs_diff_eq!(wls.slope, ols.slope, epsilon = 1e-12);
        assert_abs_diff_eq!(wls.intercept, ols.intercept, epsilon = 1e-12);
        assert_abs_diff_eq!(wls.r_squared, ols.r_squared, epsilon = 1e-12);
        assert_abs_diff_eq!(wls.std_errors[1], ols.std_errors[1], epsilon = 1e-12);
    }

    #[test]
    fn test_known_weighted_fit() {
        // Weighted normal equations with w = [1, 1, 4]:
        // Σw = 6, Σwx = 15, Σwx² = 41, Σwy = 13, Σwxy = 35
        // slope = (6·35 - 15·13) / (6·41 - 15²) = 15/21, intercept = (13 - 15·slope)/6
        let x = [1.0, 2.0, 3.0];
        let y = [1.0, 2.0, 2.5];
        let r = WeightedLeastSquares::from_weights(vec![1.0, 1.0, 4.0])
            .unwrap()
            .fit(&x, &y)
            .unwrap();
        let slope = 15.0 / 21.0;
        assert_abs_diff_eq!(r.slope, slope, epsilon = 1e-12);
        assert_abs_diff_eq!(r.intercept, (13.0 - 15.0 * slope) / 6.0, epsilon = 1e-12);
        // Residuals stay on the original scale
        assert_abs_diff_eq!(r.residuals[0], 1.0 - r.predict(1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_heteroscedastic_fit_leaves_ols_untouched() {
        let mut rng = StdRng::seed_from_u64(3);
        let noise = Normal::new(0.0, 1.0).unwrap();
        let x: Vec<f64> = (1..=100).map(f64::from).collect();
        let y: Vec<f64> = x
            .iter()
            .map(|v| 1.5 * v + 10.0 + 0.2 * v * noise.sample(&mut rng))
            .collect();

        let ols = OrdinaryLeastSquares::new().fit(&x, &y).unwrap();
        let before = ols.clone();
        let wls = WeightedLeastSquares::from_residuals(&ols.residuals)
            .unwrap()
            .fit(&x, &y)
            .unwrap();

        assert_eq!(ols, before);
        assert_eq!(wls.n_observations, 100);
        assert!(wls.std_errors.iter().all(|s| s.is_finite()));
        assert!((wls.slope - 1.5).abs() < 0.5);
    }

    #[test]
    fn test_rejects_non_positive_weights() {
        assert!(WeightedLeastSquares::from_weights(vec![1.0, 0.0]).is_err());
        assert!(WeightedLeastSquares::from_weights(vec![1.0, f64::NAN]).is_err());
    }
}
