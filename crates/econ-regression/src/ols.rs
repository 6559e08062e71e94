//! Ordinary least squares for `y = α + β·x + ε`

use crate::design::DesignMatrix;
use crate::solver::{condition_number, solve_least_squares};
use crate::types::{EstimationMethod, RegressionResult};
use econ_core::math::distributions::{fisher_sf, students_t_two_sided};
use econ_core::utils::check_finite;
use econ_core::{Error, Result};
use tracing::{debug, instrument};

/// Default ceiling on the equilibrated design's condition number
pub const DEFAULT_CONDITION_THRESHOLD: f64 = 1e10;

/// Relative RSS below which a fit is treated as exact
const EXACT_FIT_TOLERANCE: f64 = 1e-24;

/// Bivariate OLS estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrdinaryLeastSquares {
    condition_threshold: f64,
}

impl Default for OrdinaryLeastSquares {
    fn default() -> Self {
        Self::new()
    }
}

impl OrdinaryLeastSquares {
    pub fn new() -> Self {
        Self {
            condition_threshold: DEFAULT_CONDITION_THRESHOLD,
        }
    }

    pub fn with_condition_threshold(mut self, threshold: f64) -> Self {
        self.condition_threshold = threshold;
        self
    }

    pub fn condition_threshold(&self) -> f64 {
        self.condition_threshold
    }

    /// Regress `y` on `x` with an intercept
    ///
    /// # Examples
    ///
    /// ```rust
    /// use econ_regression::OrdinaryLeastSquares;
    ///
    /// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
    /// let y = [2.0, 1.0, 4.0, 3.0, 5.0];
    /// let fit = OrdinaryLeastSquares::new().fit(&x, &y).unwrap();
    /// assert!((fit.slope - 0.8).abs() < 1e-12);
    /// ```
    #[instrument(skip_all, fields(n = x.len()))]
    pub fn fit(&self, x: &[f64], y: &[f64]) -> Result<RegressionResult> {
        let result = estimate(
            x,
            y,
            None,
            self.condition_threshold,
            EstimationMethod::Ordinary,
            Vec::new(),
        )?;
        debug!(
            intercept = result.intercept,
            slope = result.slope,
            r_squared = result.r_squared,
            "OLS fitted"
        );
        Ok(result)
    }
}

/// Shared estimation path for OLS and WLS
///
/// With `weights`, rows are scaled by `√w` before solving and the fit
/// statistics use the weighted sums of squares.
pub(crate) fn estimate(
    x: &[f64],
    y: &[f64],
    weights: Option<&[f64]>,
    condition_threshold: f64,
    method: EstimationMethod,
    warnings: Vec<String>,
) -> Result<RegressionResult> {
    let context = method.abbreviation();
    if !(condition_threshold > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "condition number threshold must be positive, got {condition_threshold}"
        )));
    }
    if x.len() != y.len() {
        return Err(Error::size_mismatch(x.len(), y.len(), "regression response"));
    }
    let n = x.len();
    if n <= 2 {
        return Err(Error::insufficient(context, 3, n));
    }
    check_finite(x, "predictor")?;
    check_finite(y, "response")?;

    let x0 = x[0];
    if x.iter().all(|&v| v == x0) {
        return Err(Error::singular(context, "predictor is constant"));
    }

    let unit_weights;
    let w = match weights {
        Some(w) => {
            if w.len() != n {
                return Err(Error::size_mismatch(n, w.len(), "regression weights"));
            }
            w
        }
        None => {
            unit_weights = vec![1.0; n];
            &unit_weights
        }
    };
    let sqrt_w: Vec<f64> = w.iter().map(|v| v.sqrt()).collect();

    let design = DesignMatrix::with_intercept(x).scale_rows(&sqrt_w)?;
    let y_scaled: Vec<f64> = y.iter().zip(&sqrt_w).map(|(v, s)| v * s).collect();

    let cond = condition_number(&design);
    if cond > condition_threshold {
        return Err(Error::NumericalInstability {
            context: context.to_string(),
            condition_number: cond,
            threshold: condition_threshold,
        });
    }

    let fit = solve_least_squares(&design, &y_scaled)?;
    let intercept = fit.coefficients[0];
    let slope = fit.coefficients[1];

    let mut fitted_values: Vec<f64> = x.iter().map(|&xi| intercept + slope * xi).collect();
    let mut residuals: Vec<f64> = y
        .iter()
        .zip(&fitted_values)
        .map(|(yi, fi)| yi - fi)
        .collect();

    let weight_sum: f64 = w.iter().sum();
    let y_bar = w.iter().zip(y).map(|(wi, yi)| wi * yi).sum::<f64>() / weight_sum;
    let tss: f64 = w
        .iter()
        .zip(y)
        .map(|(wi, yi)| wi * (yi - y_bar) * (yi - y_bar))
        .sum();
    if tss <= 0.0 {
        return Err(Error::degenerate(context, "response is constant"));
    }

    let mut rss = fit.rss;
    if rss <= tss * EXACT_FIT_TOLERANCE {
        // An exact fit has exactly zero residuals
        rss = 0.0;
        residuals = vec![0.0; n];
        fitted_values = y.to_vec();
    }

    let df = n - 2;
    let df_f = df as f64;
    let sigma2 = rss / df_f;
    let se = fit.standard_errors(sigma2);
    let std_errors = [se[0], se[1]];
    let t_stats = [t_ratio(intercept, se[0]), t_ratio(slope, se[1])];
    let p_values = [
        students_t_two_sided(t_stats[0], df_f)?,
        students_t_two_sided(t_stats[1], df_f)?,
    ];

    let r_squared = (1.0 - rss / tss).clamp(0.0, 1.0);
    let adjusted_r_squared = 1.0 - (1.0 - r_squared) * (n - 1) as f64 / df_f;
    let ess = (tss - rss).max(0.0);
    let f_statistic = if rss == 0.0 {
        f64::INFINITY
    } else {
        ess / (rss / df_f)
    };
    let f_p_value = fisher_sf(f_statistic, 1.0, df_f)?;

    Ok(RegressionResult {
        method,
        intercept,
        slope,
        std_errors,
        t_stats,
        p_values,
        r_squared,
        adjusted_r_squared,
        f_statistic,
        f_p_value,
        residuals,
        fitted_values,
        degrees_of_freedom: df,
        n_observations: n,
        residual_std_error: sigma2.sqrt(),
        condition_number: cond,
        warnings,
    })
}

fn t_ratio(coefficient: f64, std_error: f64) -> f64 {
    if std_error > 0.0 {
        coefficient / std_error
    } else if coefficient == 0.0 {
        0.0
    } else {
        coefficient.signum() * f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    #[test]
    fn test_known_small_regression() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 5.0];
        let r = OrdinaryLeastSquares::new().fit(&x, &y).unwrap();

        assert_eq!(r.method, EstimationMethod::Ordinary);
        assert_abs_diff_eq!(r.intercept, 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(r.slope, 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(r.r_squared, 0.64, epsilon = 1e-12);
        // 1 - 0.36 * 4 / 3
        assert_abs_diff_eq!(r.adjusted_r_squared, 0.52, epsilon = 1e-12);
        // σ² = 3.6 / 3 = 1.2, SE(β) = sqrt(1.2 * 0.1)
        assert_abs_diff_eq!(r.std_errors[1], 0.12f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(r.std_errors[0], 1.32f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(r.f_statistic, 6.4 / 1.2, epsilon = 1e-10);
        // With one regressor F = t²
        assert_abs_diff_eq!(r.f_statistic, r.t_stats[1].powi(2), epsilon = 1e-9);
        assert_abs_diff_eq!(r.f_p_value, r.p_values[1], epsilon = 1e-9);
        assert_eq!(r.degrees_of_freedom, 3);
        assert_abs_diff_eq!(r.residual_std_error, 1.2f64.sqrt(), epsilon = 1e-12);
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn test_perfect_fit() {
        let x: Vec<f64> = (1..=50).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 5.0).collect();
        let r = OrdinaryLeastSquares::new().fit(&x, &y).unwrap();

        assert_abs_diff_eq!(r.r_squared, 1.0, epsilon = 1e-12);
        assert_eq!(r.residual_std_error, 0.0);
        assert_eq!(r.f_statistic, f64::INFINITY);
        assert_eq!(r.f_p_value, 0.0);
        assert_eq!(r.p_values[1], 0.0);
        assert!(r.p_values.iter().all(|p| !p.is_nan()));
        assert!(r.residuals.iter().all(|&e| e == 0.0));
        assert_eq!(r.fitted_values, y);
    }

    #[test]
    fn test_recovers_line_under_noise() {
        let mut rng = StdRng::seed_from_u64(42);
        let noise = Normal::new(0.0, 1.0).unwrap();
        let x: Vec<f64> = (1..=200).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 5.0 + noise.sample(&mut rng)).collect();

        let r = OrdinaryLeastSquares::new().fit(&x, &y).unwrap();
        assert_abs_diff_eq!(r.slope, 2.0, epsilon = 0.01);
        assert_abs_diff_eq!(r.intercept, 5.0, epsilon = 0.5);
        assert!(r.r_squared > 0.99);
        assert!(r.is_slope_significant(0.05));

        let sum: f64 = r.residuals.iter().sum();
        let dot: f64 = r.residuals.iter().zip(&x).map(|(e, xi)| e * xi).sum();
        assert_abs_diff_eq!(sum, 0.0, epsilon = 1e-8);
        assert_abs_diff_eq!(dot, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rejects_bad_input() {
        let ols = OrdinaryLeastSquares::new();
        assert!(matches!(
            ols.fit(&[1.0, 2.0], &[1.0, 2.0]),
            Err(Error::InsufficientData { .. })
        ));
        assert!(matches!(
            ols.fit(&[3.0, 3.0, 3.0, 3.0], &[1.0, 2.0, 3.0, 4.0]),
            Err(Error::SingularDesignMatrix { .. })
        ));
        assert!(matches!(
            ols.fit(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            ols.fit(&[1.0, 2.0, f64::NAN], &[1.0, 2.0, 3.0]),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            ols.fit(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]),
            Err(Error::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_condition_threshold() {
        let x = [1.0, 1.0 + 1e-9, 1.0 - 1e-9, 1.0 + 2e-9];
        let y = [1.0, 2.0, 3.0, 4.0];
        let err = OrdinaryLeastSquares::new()
            .with_condition_threshold(1e6)
            .fit(&x, &y)
            .unwrap_err();
        assert!(matches!(err, Error::NumericalInstability { threshold, .. } if threshold == 1e6));

        assert!(OrdinaryLeastSquares::new()
            .with_condition_threshold(0.0)
            .fit(&[1.0, 2.0, 3.0], &[1.0, 3.0, 2.0])
            .is_err());
    }
}
