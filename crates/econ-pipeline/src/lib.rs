//! Diagnostic regression pipeline for two aligned series
//!
//! [`run_diagnostics`] takes a response series (a market index) and a
//! predictor series (an atmospheric CO2 trend) and runs, in order:
//!
//! 1. descriptive statistics, Shapiro-Wilk and ADF on each raw series
//! 2. Pearson correlation
//! 3. OLS of the response on the predictor
//! 4. Breusch-Pagan and White on the OLS residuals
//! 5. Durbin-Watson and Breusch-Godfrey on the OLS residuals
//! 6. WLS with weights `1/e²`, only when step 4 flags heteroscedasticity
//!
//! The result is one immutable [`AnalysisReport`]. Loading data
//! ([`provider`]), writing reports ([`render`]) and figures ([`charts`])
//! sit around the pipeline and never feed back into it.
//!
//! # Example
//!
//! ```rust
//! use econ_core::Series;
//! use econ_pipeline::{run_diagnostics, DiagnosticsConfig};
//!
//! let x: Vec<f64> = (1..=100).map(f64::from).collect();
//! let y: Vec<f64> = x
//!     .iter()
//!     .enumerate()
//!     .map(|(i, v)| 2.0 * v + 5.0 + ((i * 7919) % 13) as f64 / 13.0 - 0.5)
//!     .collect();
//!
//! let report = run_diagnostics(
//!     &Series::new("index", y).unwrap(),
//!     &Series::new("co2", x).unwrap(),
//!     &DiagnosticsConfig::default(),
//! )
//! .unwrap();
//! assert!((report.ols.slope - 2.0).abs() < 0.05);
//! assert_eq!(report.wls.is_some(), report.heteroscedasticity.has_heteroscedasticity);
//! ```

pub mod charts;
pub mod config;
pub mod interpretation;
pub mod pipeline;
pub mod provider;
pub mod render;
pub mod report;

pub use charts::{ChartData, ChartRenderer, JsonChartRenderer, NullChartRenderer};
pub use config::DiagnosticsConfig;
pub use interpretation::{Interpretation, Issue};
pub use pipeline::{run_diagnostics, run_on_dataset};
pub use provider::{
    merge_series, write_dataset_csv, CsvSeriesProvider, InMemoryProvider, MergeOutcome,
    SeriesProvider,
};
pub use render::{JsonReportRenderer, RenderOptions, ReportRenderer, TextReportRenderer};
pub use report::{AnalysisReport, CorrelationResult, SeriesDiagnostics};
