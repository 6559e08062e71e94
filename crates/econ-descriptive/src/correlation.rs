//! Pearson product-moment correlation

use econ_core::utils::mean;
use econ_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Calculate the Pearson correlation coefficient
///
/// Zero variance in either input is an error, never a NaN. The result is
/// clamped to `[-1, 1]`.
///
/// # Examples
///
/// ```rust
/// use econ_descriptive::pearson;
///
/// let r = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
/// assert!((r - 1.0).abs() < 1e-12);
/// ```
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(Error::size_mismatch(x.len(), y.len(), "Pearson correlation"));
    }
    if x.len() < 2 {
        return Err(Error::insufficient("Pearson correlation", 2, x.len()));
    }
    econ_core::utils::check_finite(x, "Pearson correlation input")?;
    econ_core::utils::check_finite(y, "Pearson correlation input")?;

    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut numerator = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;

    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        numerator += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    if sum_sq_x == 0.0 {
        return Err(Error::degenerate("Pearson correlation", "first series has zero variance"));
    }
    if sum_sq_y == 0.0 {
        return Err(Error::degenerate("Pearson correlation", "second series has zero variance"));
    }

    Ok((numerator / (sum_sq_x.sqrt() * sum_sq_y.sqrt())).clamp(-1.0, 1.0))
}

/// Verbal strength of a correlation coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationStrength {
    /// |r| > 0.7
    Strong,
    /// 0.3 < |r| <= 0.7
    Moderate,
    Weak,
}

impl CorrelationStrength {
    pub fn classify(r: f64) -> Self {
        let magnitude = r.abs();
        if magnitude > 0.7 {
            Self::Strong
        } else if magnitude > 0.3 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Weak => "weak",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationDirection {
    Positive,
    Negative,
}

impl CorrelationDirection {
    pub fn classify(r: f64) -> Self {
        if r > 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}
