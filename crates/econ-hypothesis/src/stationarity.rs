//! Augmented Dickey-Fuller unit-root test
//!
//! Test regression with a constant and no trend:
//!
//! `Δy_t = c + φ·y_{t-1} + Σ_{i=1..p} γ_i·Δy_{t-i} + ε_t`
//!
//! H₀ is a unit root (`φ = 0`). The statistic is the t-ratio of `φ̂`.

use crate::mackinnon;
use crate::types::{LagSelection, StationarityResult};
use econ_core::utils::{check_finite, sum_of_squares, sum_squared_deviations};
use econ_core::{Error, Result};
use econ_regression::{solve_least_squares, DesignMatrix, LeastSquaresFit};
use tracing::{debug, warn};

/// Shortest series the test accepts
pub const MIN_OBSERVATIONS: usize = 10;

/// Relative spread of the differences below which a series is a straight line
const LINEAR_TREND_TOLERANCE: f64 = 1e-20;

/// ADF test with configurable lag selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AugmentedDickeyFuller {
    significance_level: f64,
    lag_selection: LagSelection,
}

impl AugmentedDickeyFuller {
    pub fn new(significance_level: f64) -> Self {
        Self {
            significance_level,
            lag_selection: LagSelection::default(),
        }
    }

    pub fn with_lag_selection(mut self, lag_selection: LagSelection) -> Self {
        self.lag_selection = lag_selection;
        self
    }

    pub fn test(&self, data: &[f64]) -> Result<StationarityResult> {
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "significance level must be in (0, 1), got {}",
                self.significance_level
            )));
        }
        check_finite(data, "ADF input")?;
        let n = data.len();
        if n < MIN_OBSERVATIONS {
            return Err(Error::insufficient(
                "Augmented Dickey-Fuller",
                MIN_OBSERVATIONS,
                n,
            ));
        }
        let first = data[0];
        if data.iter().all(|&v| v == first) {
            return Err(Error::degenerate("Augmented Dickey-Fuller", "series is constant"));
        }

        let diffs: Vec<f64> = data.windows(2).map(|w| w[1] - w[0]).collect();
        if is_linear_trend(&diffs) {
            // Δy is constant: φ̂ = 0 with zero residual variance, and the
            // lagged differences duplicate the constant.
            warn!(n, "series is an exact linear trend, ADF statistic set to 0");
            let p_value = mackinnon::p_value(0.0);
            return Ok(StationarityResult {
                adf_statistic: 0.0,
                p_value,
                critical_values: mackinnon::critical_values(n - 1),
                used_lag: 0,
                n_obs: n - 1,
                is_stationary: p_value < self.significance_level,
            });
        }

        let feasible_max = max_feasible_lag(n);

        let lag = match self.lag_selection {
            LagSelection::Fixed(p) => {
                if p > feasible_max {
                    return Err(Error::insufficient(
                        &format!("ADF regression with {p} lags"),
                        2 * p + 4,
                        n,
                    ));
                }
                p
            }
            LagSelection::Schwert => schwert_max_lag(n).min(feasible_max),
            LagSelection::Aic => {
                let max_lag = aic_max_lag(n).min(feasible_max);
                select_lag_by_aic(data, &diffs, max_lag)?
            }
        };

        let fit = fit_regression(data, &diffs, lag, lag)?;
        let phi = fit.coefficients[1];
        let sigma2 = fit.rss / fit.df_resid() as f64;
        let se = fit.standard_errors(sigma2)[1];
        if !(se > 0.0) {
            return Err(Error::degenerate(
                "Augmented Dickey-Fuller",
                "test regression fits the differences exactly",
            ));
        }

        let adf_statistic = phi / se;
        let p_value = mackinnon::p_value(adf_statistic);
        let n_obs = fit.n_observations;
        debug!(lag, n_obs, adf_statistic, p_value, "ADF");

        Ok(StationarityResult {
            adf_statistic,
            p_value,
            critical_values: mackinnon::critical_values(n_obs),
            used_lag: lag,
            n_obs,
            is_stationary: p_value < self.significance_level,
        })
    }
}

/// Schwert's rule `⌊12·(n/100)^¼⌋`
pub fn schwert_max_lag(n: usize) -> usize {
    (12.0 * (n as f64 / 100.0).powf(0.25)).floor() as usize
}

/// Upper end of the AIC search, `⌈12·(n/100)^¼⌉`
pub fn aic_max_lag(n: usize) -> usize {
    (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as usize
}

/// Differences equal up to rounding
fn is_linear_trend(diffs: &[f64]) -> bool {
    sum_squared_deviations(diffs) <= LINEAR_TREND_TOLERANCE * sum_of_squares(diffs)
}

/// Largest lag that leaves the regression more rows than columns + 1
fn max_feasible_lag(n: usize) -> usize {
    (n / 2).saturating_sub(2)
}

/// Minimise `n·ln(RSS/n) + 2k` over `0..=max_lag` on the sample shared by all candidates
fn select_lag_by_aic(data: &[f64], diffs: &[f64], max_lag: usize) -> Result<usize> {
    let mut best: Option<(f64, usize)> = None;
    let mut last_error = None;

    for lag in 0..=max_lag {
        match fit_regression(data, diffs, lag, max_lag) {
            Ok(fit) => {
                let m = fit.n_observations as f64;
                let aic = m * (fit.rss / m).ln() + 2.0 * fit.n_parameters as f64;
                debug!(lag, aic, "ADF lag candidate");
                if best.map_or(true, |(best_aic, _)| aic < best_aic) {
                    best = Some((aic, lag));
                }
            }
            Err(e) => last_error = Some(e),
        }
    }

    match (best, last_error) {
        (Some((_, lag)), _) => Ok(lag),
        (None, Some(e)) => Err(e),
        (None, None) => Err(Error::Computation(
            "no ADF lag candidate could be fitted".to_string(),
        )),
    }
}

/// Fit the test regression with `lag` lagged differences, starting at row `start >= lag`
fn fit_regression(data: &[f64], diffs: &[f64], lag: usize, start: usize) -> Result<LeastSquaresFit> {
    let rows = start..diffs.len();
    let response: Vec<f64> = diffs[rows.clone()].to_vec();

    let mut columns = vec![
        ("const".to_string(), vec![1.0; response.len()]),
        ("y_lag".to_string(), rows.clone().map(|t| data[t]).collect()),
    ];
    for i in 1..=lag {
        columns.push((
            format!("dy_lag{i}"),
            rows.clone().map(|t| diffs[t - i]).collect(),
        ));
    }

    let design = DesignMatrix::from_columns(columns)?;
    solve_least_squares(&design, &response)
}
