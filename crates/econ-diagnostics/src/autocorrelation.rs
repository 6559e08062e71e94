//! Serial-correlation diagnostics for regression residuals

use crate::auxiliary::{f_p_value, fit_auxiliary, lm_p_value};
use crate::heteroscedasticity::validate_significance;
use crate::types::{AutocorrelationResult, BreuschGodfrey, DurbinWatson, DurbinWatsonBounds};
use econ_core::utils::{check_finite, sum_of_squares};
use econ_core::{Error, Result};
use econ_regression::DesignMatrix;
use tracing::{debug, instrument, warn};

/// Default number of lagged residuals in the Breusch-Godfrey regression
pub const DEFAULT_LAG_COUNT: usize = 10;

/// `Σ_{t≥2}(e_t - e_{t-1})² / Σ e_t²`
///
/// Close to 2 without first-order correlation, towards 0 for positive and
/// towards 4 for negative correlation.
pub fn durbin_watson(residuals: &[f64]) -> Result<f64> {
    check_finite(residuals, "residuals")?;
    if residuals.len() < 2 {
        return Err(Error::insufficient("Durbin-Watson", 2, residuals.len()));
    }
    let denominator = sum_of_squares(residuals);
    if denominator == 0.0 {
        return Err(Error::degenerate("Durbin-Watson", "all residuals are zero"));
    }
    let numerator: f64 = residuals
        .windows(2)
        .map(|w| (w[1] - w[0]) * (w[1] - w[0]))
        .sum();
    Ok(numerator / denominator)
}

/// Breusch-Godfrey LM test for serial correlation up to order `lag_count`
///
/// The residuals are regressed on `design` plus `lag_count` of their own
/// lags. Pre-sample lags are zero so all `n` rows are kept.
pub fn breusch_godfrey(
    residuals: &[f64],
    design: &DesignMatrix,
    lag_count: usize,
    significance_level: f64,
) -> Result<BreuschGodfrey> {
    validate_significance(significance_level)?;
    if lag_count == 0 {
        return Err(Error::InvalidParameter(
            "Breusch-Godfrey lag count must be at least 1".to_string(),
        ));
    }
    check_finite(residuals, "residuals")?;
    let n = residuals.len();
    if n != design.nrows() {
        return Err(Error::size_mismatch(design.nrows(), n, "residuals"));
    }
    let k = design.ncols() + lag_count;
    if n <= k {
        return Err(Error::insufficient("Breusch-Godfrey", k + 1, n));
    }

    let rss_restricted = sum_of_squares(residuals);
    if rss_restricted == 0.0 {
        return Err(Error::degenerate("Breusch-Godfrey", "all residuals are zero"));
    }

    let mut augmented = design.clone();
    for lag in 1..=lag_count {
        let lagged: Vec<f64> = (0..n)
            .map(|t| if t >= lag { residuals[t - lag] } else { 0.0 })
            .collect();
        augmented.push_column(format!("e_lag{lag}"), &lagged)?;
    }

    let aux = fit_auxiliary(&augmented, residuals)?;
    let df_resid = aux.df_resid();
    let rss_unrestricted = aux.fit.rss;

    let lm_statistic = aux.lm_statistic;
    let lm_p = lm_p_value(lm_statistic, lag_count)?;

    let f_statistic = if rss_unrestricted == 0.0 {
        f64::INFINITY
    } else {
        ((rss_restricted - rss_unrestricted).max(0.0) / lag_count as f64)
            / (rss_unrestricted / df_resid as f64)
    };
    let f_p = f_p_value(f_statistic, lag_count, df_resid)?;

    Ok(BreuschGodfrey {
        lag_count,
        lm_statistic,
        lm_p_value: lm_p,
        f_statistic,
        f_p_value: f_p,
        flag: lm_p < significance_level,
    })
}

/// Runs Durbin-Watson and Breusch-Godfrey on the residuals of `y = α + β·x`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutocorrelationTests {
    significance_level: f64,
    lag_count: usize,
    bounds: DurbinWatsonBounds,
}

impl AutocorrelationTests {
    pub fn new(significance_level: f64) -> Self {
        Self {
            significance_level,
            lag_count: DEFAULT_LAG_COUNT,
            bounds: DurbinWatsonBounds::default(),
        }
    }

    pub fn with_lag_count(mut self, lag_count: usize) -> Self {
        self.lag_count = lag_count;
        self
    }

    pub fn with_durbin_watson_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.bounds = DurbinWatsonBounds { lower, upper };
        self
    }

    #[instrument(skip_all, fields(n = residuals.len(), lags = self.lag_count))]
    pub fn run(&self, residuals: &[f64], x: &[f64]) -> Result<AutocorrelationResult> {
        if self.bounds.lower >= self.bounds.upper {
            return Err(Error::InvalidParameter(format!(
                "Durbin-Watson lower bound {} must be below upper bound {}",
                self.bounds.lower, self.bounds.upper
            )));
        }
        if residuals.len() != x.len() {
            return Err(Error::size_mismatch(x.len(), residuals.len(), "residuals"));
        }

        let durbin_watson =
            DurbinWatson::from_statistic(durbin_watson(residuals)?, self.bounds);
        let design = DesignMatrix::with_intercept(x);
        let breusch_godfrey =
            breusch_godfrey(residuals, &design, self.lag_count, self.significance_level)?;
        let has_autocorrelation = durbin_watson.flag || breusch_godfrey.flag;

        debug!(
            dw = durbin_watson.statistic,
            bg_lm = breusch_godfrey.lm_statistic,
            bg_p = breusch_godfrey.lm_p_value,
            "autocorrelation tests"
        );
        if has_autocorrelation {
            warn!(
                dw = durbin_watson.statistic,
                bg_p = breusch_godfrey.lm_p_value,
                "residuals are serially correlated"
            );
        }

        Ok(AutocorrelationResult {
            durbin_watson,
            breusch_godfrey,
            has_autocorrelation,
        })
    }
}
