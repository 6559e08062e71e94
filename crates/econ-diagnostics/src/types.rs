//! Result types for residual diagnostics

use serde::{Deserialize, Serialize};

/// Lagrange-multiplier test with its F-form companion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LmTest {
    pub lm_statistic: f64,
    pub lm_p_value: f64,
    pub f_statistic: f64,
    pub f_p_value: f64,
    /// Degrees of freedom of the LM statistic's chi-squared reference
    pub df: usize,
    /// `lm_p_value < significance_level`
    pub rejects: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeteroscedasticityResult {
    pub breusch_pagan: LmTest,
    pub white: LmTest,
    /// Either test rejects homoscedasticity
    pub has_heteroscedasticity: bool,
}

/// Thresholds for the Durbin-Watson heuristic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurbinWatsonBounds {
    pub lower: f64,
    pub upper: f64,
}

impl Default for DurbinWatsonBounds {
    fn default() -> Self {
        Self {
            lower: 1.5,
            upper: 2.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurbinWatson {
    pub statistic: f64,
    /// Statistic falls outside `[lower, upper]`
    pub flag: bool,
}

impl DurbinWatson {
    pub fn from_statistic(statistic: f64, bounds: DurbinWatsonBounds) -> Self {
        Self {
            statistic,
            flag: statistic < bounds.lower || statistic > bounds.upper,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreuschGodfrey {
    pub lag_count: usize,
    pub lm_statistic: f64,
    pub lm_p_value: f64,
    pub f_statistic: f64,
    pub f_p_value: f64,
    /// `lm_p_value < significance_level`
    pub flag: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutocorrelationResult {
    pub durbin_watson: DurbinWatson,
    pub breusch_godfrey: BreuschGodfrey,
    /// Durbin-Watson or Breusch-Godfrey flags serial correlation
    pub has_autocorrelation: bool,
}
