//! Hypothesis tests run on each raw series before regression
//!
//! - [`ShapiroWilk`]: normality (Royston AS R94)
//! - [`AugmentedDickeyFuller`]: unit root, with MacKinnon p-values and
//!   critical values from [`mackinnon`]
//!
//! # Example
//!
//! ```rust
//! use econ_hypothesis::{AugmentedDickeyFuller, LagSelection, ShapiroWilk};
//!
//! let data: Vec<f64> = (0..60).map(|i| ((i * 37) % 11) as f64 - 5.0).collect();
//!
//! let normality = ShapiroWilk::new(0.05).test(&data).unwrap();
//! assert!(normality.statistic > 0.0 && normality.statistic <= 1.0);
//!
//! let stationarity = AugmentedDickeyFuller::new(0.05)
//!     .with_lag_selection(LagSelection::Fixed(1))
//!     .test(&data)
//!     .unwrap();
//! assert_eq!(stationarity.used_lag, 1);
//! ```

pub mod mackinnon;
pub mod normality;
pub mod stationarity;
pub mod types;

pub use normality::ShapiroWilk;
pub use stationarity::AugmentedDickeyFuller;
pub use types::{CriticalValues, LagSelection, NormalityResult, StationarityResult};
