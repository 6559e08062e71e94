//! Descriptive statistics for the econometric diagnostics pipeline
//!
//! - [`DescriptiveStats`]: mean, sample variance, extremes and quartiles
//! - [`quantile_linear`]: type-7 quantiles on sorted data
//! - [`pearson`]: product-moment correlation with strength classification

pub mod correlation;
pub mod descriptive;
pub mod quantile;

pub use correlation::{pearson, CorrelationDirection, CorrelationStrength};
pub use descriptive::DescriptiveStats;
pub use quantile::{quantile_linear, quantiles_linear};
