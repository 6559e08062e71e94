//! Core types for the econometric diagnostics pipeline
//!
//! This crate holds what every other `econ-*` crate builds on:
//!
//! - [`Error`] and [`Result`], shared by all crates
//! - [`Series`] and [`Dataset`], the validated inputs
//! - tail probabilities and polynomial helpers in [`math`]
//! - slice helpers in [`utils`]

pub mod error;
pub mod math;
pub mod series;
pub mod utils;

pub use error::{Error, Result};
pub use series::{Dataset, DatasetSummary, Observation, Series};

/// Convenient imports for downstream crates
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::math::distributions;
    pub use crate::series::{Dataset, DatasetSummary, Observation, Series};
    pub use crate::utils::{mean, sorted, std_dev, variance};
}
