//! The aggregate result of one diagnostics run

use crate::config::DiagnosticsConfig;
use crate::interpretation::Interpretation;
use econ_descriptive::{CorrelationDirection, CorrelationStrength, DescriptiveStats};
use econ_diagnostics::{AutocorrelationResult, HeteroscedasticityResult};
use econ_hypothesis::{NormalityResult, StationarityResult};
use econ_regression::RegressionResult;
use serde::{Deserialize, Serialize};

/// Tests run on one raw series before any regression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDiagnostics {
    pub name: String,
    pub descriptive: DescriptiveStats,
    pub normality: NormalityResult,
    pub stationarity: StationarityResult,
}

/// Pearson coefficient between response and predictor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub coefficient: f64,
    pub strength: CorrelationStrength,
    pub direction: CorrelationDirection,
}

impl CorrelationResult {
    pub fn new(coefficient: f64) -> Self {
        Self {
            coefficient,
            strength: CorrelationStrength::classify(coefficient),
            direction: CorrelationDirection::classify(coefficient),
        }
    }
}

/// Everything [`run_diagnostics`](crate::run_diagnostics) computed
///
/// `wls` is present exactly when `heteroscedasticity.has_heteroscedasticity`
/// is set; the OLS result is reported either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub n_observations: usize,
    pub config: DiagnosticsConfig,
    /// Series A, the regression's `Y`
    pub response: SeriesDiagnostics,
    /// Series B, the regression's `X`
    pub predictor: SeriesDiagnostics,
    pub correlation: CorrelationResult,
    pub ols: RegressionResult,
    pub heteroscedasticity: HeteroscedasticityResult,
    pub autocorrelation: AutocorrelationResult,
    pub wls: Option<RegressionResult>,
    pub interpretation: Interpretation,
}

impl AnalysisReport {
    /// WLS when it was estimated, otherwise OLS
    pub fn primary_regression(&self) -> &RegressionResult {
        self.wls.as_ref().unwrap_or(&self.ols)
    }

    /// Both series diagnostics, response first
    pub fn series(&self) -> [&SeriesDiagnostics; 2] {
        [&self.response, &self.predictor]
    }
}
