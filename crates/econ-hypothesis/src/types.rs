//! Result and parameter types for the hypothesis tests

use serde::{Deserialize, Serialize};

/// Outcome of a Shapiro-Wilk test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalityResult {
    /// W statistic in (0, 1]
    pub statistic: f64,
    pub p_value: f64,
    /// `p_value > significance_level`
    pub is_normal: bool,
    /// Number of points the statistic was computed on (after sub-sampling)
    pub sample_size: usize,
}

/// Dickey-Fuller critical values for the constant-only model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriticalValues {
    pub one_percent: f64,
    pub five_percent: f64,
    pub ten_percent: f64,
}

/// Outcome of an augmented Dickey-Fuller test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationarityResult {
    pub adf_statistic: f64,
    pub p_value: f64,
    pub critical_values: CriticalValues,
    /// Number of lagged differences in the test regression
    pub used_lag: usize,
    /// Rows of the test regression
    pub n_obs: usize,
    /// `p_value < significance_level`
    pub is_stationary: bool,
}

/// How the number of lagged differences in the ADF regression is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "method", content = "lags")]
pub enum LagSelection {
    /// Exactly this many lags
    Fixed(usize),
    /// `⌊12·(n/100)^¼⌋`
    Schwert,
    /// Minimum AIC over `0..=⌈12·(n/100)^¼⌉`
    Aic,
}

impl Default for LagSelection {
    fn default() -> Self {
        Self::Aic
    }
}
