//! Configuration for a diagnostics run

use econ_core::{Error, Result};
use econ_hypothesis::LagSelection;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters of every statistical step in [`run_diagnostics`](crate::run_diagnostics)
///
/// Missing fields take their defaults when deserialised, so a JSON file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// α shared by every test
    pub significance_level: f64,
    /// Larger series are sub-sampled before Shapiro-Wilk
    pub normality_sample_cap: usize,
    pub normality_seed: u64,
    /// Lags in the Breusch-Godfrey regression
    pub autocorrelation_lag_count: usize,
    pub durbin_watson_lower: f64,
    pub durbin_watson_upper: f64,
    pub adf_lag_selection: LagSelection,
    /// Largest accepted condition number of the (weighted) design matrix
    pub condition_number_threshold: f64,
    /// Shortest series the pipeline accepts
    pub min_observations: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            significance_level: 0.05,
            normality_sample_cap: econ_hypothesis::normality::DEFAULT_SAMPLE_CAP,
            normality_seed: econ_hypothesis::normality::DEFAULT_SEED,
            autocorrelation_lag_count: econ_diagnostics::DEFAULT_LAG_COUNT,
            durbin_watson_lower: 1.5,
            durbin_watson_upper: 2.5,
            adf_lag_selection: LagSelection::default(),
            condition_number_threshold: econ_regression::DEFAULT_CONDITION_THRESHOLD,
            min_observations: 20,
        }
    }
}

impl DiagnosticsConfig {
    pub fn with_significance_level(mut self, significance_level: f64) -> Self {
        self.significance_level = significance_level;
        self
    }

    pub fn with_min_observations(mut self, min_observations: usize) -> Self {
        self.min_observations = min_observations;
        self
    }

    pub fn with_autocorrelation_lag_count(mut self, lag_count: usize) -> Self {
        self.autocorrelation_lag_count = lag_count;
        self
    }

    pub fn with_adf_lag_selection(mut self, lag_selection: LagSelection) -> Self {
        self.adf_lag_selection = lag_selection;
        self
    }

    /// Check every parameter before any computation starts
    pub fn validate(&self) -> Result<()> {
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "significance_level must be in (0, 1), got {}",
                self.significance_level
            )));
        }
        if self.normality_sample_cap < 3 {
            return Err(Error::InvalidParameter(format!(
                "normality_sample_cap must be at least 3, got {}",
                self.normality_sample_cap
            )));
        }
        if self.autocorrelation_lag_count == 0 {
            return Err(Error::InvalidParameter(
                "autocorrelation_lag_count must be at least 1".to_string(),
            ));
        }
        if !(self.durbin_watson_lower < self.durbin_watson_upper) {
            return Err(Error::InvalidParameter(format!(
                "durbin_watson_lower ({}) must be below durbin_watson_upper ({})",
                self.durbin_watson_lower, self.durbin_watson_upper
            )));
        }
        if !(self.condition_number_threshold > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "condition_number_threshold must be positive, got {}",
                self.condition_number_threshold
            )));
        }
        if self.min_observations < 3 {
            return Err(Error::InvalidParameter(format!(
                "min_observations must be at least 3, got {}",
                self.min_observations
            )));
        }
        Ok(())
    }

    /// Load and validate a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text).map_err(|e| {
            Error::InvalidInput(format!("cannot parse config {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DiagnosticsConfig::default();
        assert_eq!(config.significance_level, 0.05);
        assert_eq!(config.normality_sample_cap, 5000);
        assert_eq!(config.normality_seed, 42);
        assert_eq!(config.autocorrelation_lag_count, 10);
        assert_eq!(config.adf_lag_selection, LagSelection::Aic);
        assert_eq!(config.condition_number_threshold, 1e10);
        assert_eq!(config.min_observations, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            DiagnosticsConfig::default().with_significance_level(0.0),
            DiagnosticsConfig::default().with_significance_level(1.0),
            DiagnosticsConfig::default().with_autocorrelation_lag_count(0),
            DiagnosticsConfig::default().with_min_observations(2),
            DiagnosticsConfig {
                normality_sample_cap: 2,
                ..Default::default()
            },
            DiagnosticsConfig {
                durbin_watson_lower: 2.5,
                durbin_watson_upper: 1.5,
                ..Default::default()
            },
            DiagnosticsConfig {
                condition_number_threshold: 0.0,
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(Error::InvalidParameter(_))),
                "{config:?}"
            );
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DiagnosticsConfig = serde_json::from_str(
            r#"{ "significance_level": 0.01, "adf_lag_selection": { "method": "fixed", "lags": 3 } }"#,
        )
        .unwrap();
        assert_eq!(config.significance_level, 0.01);
        assert_eq!(config.adf_lag_selection, LagSelection::Fixed(3));
        assert_eq!(config.autocorrelation_lag_count, 10);
    }

    #[test]
    fn test_from_json_file() {
        let path = std::env::temp_dir().join(format!("econ-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "min_observations": 50 }"#).unwrap();
        let config = DiagnosticsConfig::from_json_file(&path).unwrap();
        assert_eq!(config.min_observations, 50);

        std::fs::write(&path, r#"{ "significance_level": 2.0 }"#).unwrap();
        assert!(DiagnosticsConfig::from_json_file(&path).is_err());

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            DiagnosticsConfig::from_json_file(&path),
            Err(Error::InvalidInput(_))
        ));
        std::fs::remove_file(&path).unwrap();
    }
}
