//! Descriptive summary of a single series

use crate::quantile::quantile_linear;
use econ_core::utils::{mean, sorted, variance};
use econ_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Location, spread and quartiles of one series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
}

impl DescriptiveStats {
    /// Summarise `data`
    ///
    /// A single observation yields zero variance.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use econ_descriptive::DescriptiveStats;
    ///
    /// let stats = DescriptiveStats::compute(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    /// assert_eq!(stats.median, 3.0);
    /// assert_eq!(stats.variance, 2.5);
    /// ```
    pub fn compute(data: &[f64]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::insufficient("descriptive statistics", 1, 0));
        }
        econ_core::utils::check_finite(data, "descriptive statistics input")?;

        let sorted = sorted(data);
        let variance = variance(data);

        let stats = Self {
            mean: mean(data),
            std: variance.sqrt(),
            variance,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            median: quantile_linear(&sorted, 0.5)?,
            q1: quantile_linear(&sorted, 0.25)?,
            q3: quantile_linear(&sorted, 0.75)?,
        };
        debug!(n = data.len(), mean = stats.mean, std = stats.std, "descriptive statistics");
        Ok(stats)
    }

    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}
