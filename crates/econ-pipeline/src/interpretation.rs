//! Verbal conclusions drawn from the numeric results
//!
//! Computed once when the report is assembled so every renderer states the
//! same conclusions.

use crate::report::{CorrelationResult, SeriesDiagnostics};
use econ_descriptive::{CorrelationDirection, CorrelationStrength};
use econ_diagnostics::{AutocorrelationResult, HeteroscedasticityResult};
use econ_regression::{EstimationMethod, RegressionResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A problem one of the diagnostics detected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Issue {
    Heteroscedasticity,
    Autocorrelation,
    NonStationary { series: String },
    NonNormal { series: String },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heteroscedasticity => f.write_str("heteroscedasticity in the OLS residuals"),
            Self::Autocorrelation => f.write_str("serial correlation in the OLS residuals"),
            Self::NonStationary { series } => write!(f, "{series} has a unit root"),
            Self::NonNormal { series } => write!(f, "{series} is not normally distributed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub correlation_strength: CorrelationStrength,
    pub correlation_direction: CorrelationDirection,
    /// OLS slope p-value below α
    pub slope_significant: bool,
    /// OLS R² as a percentage
    pub explained_variance_pct: f64,
    /// Estimator whose coefficients should be read; WLS whenever it was fitted
    pub primary_estimator: EstimationMethod,
    /// In the order residual issues, then per-series issues (response first)
    pub issues: Vec<Issue>,
}

impl Interpretation {
    #[allow(clippy::too_many_arguments)]
    pub fn derive(
        response: &SeriesDiagnostics,
        predictor: &SeriesDiagnostics,
        correlation: &CorrelationResult,
        ols: &RegressionResult,
        heteroscedasticity: &HeteroscedasticityResult,
        autocorrelation: &AutocorrelationResult,
        wls: Option<&RegressionResult>,
        significance_level: f64,
    ) -> Self {
        let mut issues = Vec::new();
        if heteroscedasticity.has_heteroscedasticity {
            issues.push(Issue::Heteroscedasticity);
        }
        if autocorrelation.has_autocorrelation {
            issues.push(Issue::Autocorrelation);
        }
        for series in [response, predictor] {
            if !series.stationarity.is_stationary {
                issues.push(Issue::NonStationary {
                    series: series.name.clone(),
                });
            }
        }
        for series in [response, predictor] {
            if !series.normality.is_normal {
                issues.push(Issue::NonNormal {
                    series: series.name.clone(),
                });
            }
        }

        Self {
            correlation_strength: correlation.strength,
            correlation_direction: correlation.direction,
            slope_significant: ols.is_slope_significant(significance_level),
            explained_variance_pct: ols.explained_variance_pct(),
            primary_estimator: wls.map_or(EstimationMethod::Ordinary, |w| w.method),
            issues,
        }
    }

    /// Residual problems only; per-series findings are descriptive
    pub fn has_residual_issues(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| matches!(issue, Issue::Heteroscedasticity | Issue::Autocorrelation))
    }
}
