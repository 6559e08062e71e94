//! Diagnostic regression of a market index on an atmospheric CO2 series
//!
//! Facade over the workspace crates:
//!
//! - [`core`]: errors, validated series and datasets
//! - [`descriptive`]: summary statistics and Pearson correlation
//! - [`hypothesis`]: Shapiro-Wilk and augmented Dickey-Fuller
//! - [`regression`]: OLS and WLS on a QR solver
//! - [`diagnostics`]: Breusch-Pagan, White, Durbin-Watson, Breusch-Godfrey
//! - [`pipeline`]: [`run_diagnostics`], the report, renderers and providers
//!
//! # Example
//!
//! ```rust
//! use econ_stats::{run_diagnostics, DiagnosticsConfig, Series};
//!
//! let co2: Vec<f64> = (0..120).map(|i| 405.0 + 0.01 * i as f64 + (i as f64 / 9.0).sin()).collect();
//! let index: Vec<f64> = co2
//!     .iter()
//!     .enumerate()
//!     .map(|(i, c)| 20000.0 + 300.0 * (c - 405.0) + ((i * 37) % 17) as f64)
//!     .collect();
//!
//! let report = run_diagnostics(
//!     &Series::new("DJI_Close", index).unwrap(),
//!     &Series::new("CO2_Level", co2).unwrap(),
//!     &DiagnosticsConfig::default(),
//! )
//! .unwrap();
//! assert!(report.ols.slope > 0.0);
//! ```

pub use econ_core as core;
pub use econ_descriptive as descriptive;
pub use econ_diagnostics as diagnostics;
pub use econ_hypothesis as hypothesis;
pub use econ_pipeline as pipeline;
pub use econ_regression as regression;

pub use econ_core::{Dataset, Error, Observation, Result, Series};
pub use econ_pipeline::{run_diagnostics, run_on_dataset, AnalysisReport, DiagnosticsConfig};
