//! Residual diagnostics for a fitted bivariate regression
//!
//! Heteroscedasticity ([`breusch_pagan`], [`white`]) and serial correlation
//! ([`durbin_watson`], [`breusch_godfrey`]) are all driven by auxiliary
//! regressions on the OLS residuals.

pub mod autocorrelation;
pub mod auxiliary;
pub mod heteroscedasticity;
pub mod types;

pub use autocorrelation::{breusch_godfrey, durbin_watson, AutocorrelationTests, DEFAULT_LAG_COUNT};
pub use heteroscedasticity::{breusch_pagan, white, HeteroscedasticityTests};
pub use types::{
    AutocorrelationResult, BreuschGodfrey, DurbinWatson, DurbinWatsonBounds,
    HeteroscedasticityResult, LmTest,
};
