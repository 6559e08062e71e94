//! Result types for bivariate regression

use serde::{Deserialize, Serialize};

/// Estimator that produced a [`RegressionResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstimationMethod {
    Ordinary,
    Weighted,
}

impl EstimationMethod {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Ordinary => "OLS",
            Self::Weighted => "WLS",
        }
    }
}

impl std::fmt::Display for EstimationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Fitted model `y = intercept + slope·x`
///
/// Index 0 of the coefficient arrays is the intercept, index 1 the slope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub method: EstimationMethod,
    pub intercept: f64,
    pub slope: f64,
    pub std_errors: [f64; 2],
    pub t_stats: [f64; 2],
    pub p_values: [f64; 2],
    pub r_squared: f64,
    pub adjusted_r_squared: f64,
    pub f_statistic: f64,
    pub f_p_value: f64,
    /// On the original, unweighted scale
    pub residuals: Vec<f64>,
    pub fitted_values: Vec<f64>,
    pub degrees_of_freedom: usize,
    pub n_observations: usize,
    pub residual_std_error: f64,
    pub condition_number: f64,
    /// Adjustments made while estimating, e.g. floored weights
    pub warnings: Vec<String>,
}

impl RegressionResult {
    pub fn coefficients(&self) -> [f64; 2] {
        [self.intercept, self.slope]
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    pub fn is_slope_significant(&self, significance_level: f64) -> bool {
        self.p_values[1] < significance_level
    }

    /// R² as a percentage
    pub fn explained_variance_pct(&self) -> f64 {
        self.r_squared * 100.0
    }

    /// Residual sum of squares on the original scale
    pub fn rss(&self) -> f64 {
        self.residuals.iter().map(|e| e * e).sum()
    }
}
