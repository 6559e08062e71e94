//! Mathematical utilities shared by the hypothesis tests and estimators
//!
//! Tail probabilities are computed with `statrs`. Infinite statistics (a
//! perfect fit, a zero standard error) map to the limiting probability
//! instead of leaking NaN into results.

use crate::error::{Error, Result};

/// Distribution-related mathematical functions
pub mod distributions {
    use super::*;
    use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, Normal, StudentsT};

    fn dist_error(name: &str, e: impl std::fmt::Display) -> Error {
        Error::Computation(format!("Failed to create {name} distribution: {e}"))
    }

    /// Standard normal distribution utilities
    pub mod normal {
        use super::*;

        fn standard() -> Normal {
            // Parameters are constant and valid
            Normal::new(0.0, 1.0).unwrap_or_else(|_| unreachable!())
        }

        /// Cumulative distribution function of N(0, 1)
        pub fn cdf(x: f64) -> f64 {
            if x.is_nan() {
                return f64::NAN;
            }
            standard().cdf(x)
        }

        /// Upper tail probability P(Z > x)
        pub fn sf(x: f64) -> f64 {
            // Symmetry keeps precision in the far upper tail
            cdf(-x)
        }

        /// Quantile function of N(0, 1)
        pub fn ppf(p: f64) -> f64 {
            if p <= 0.0 {
                return f64::NEG_INFINITY;
            }
            if p >= 1.0 {
                return f64::INFINITY;
            }
            standard().inverse_cdf(p)
        }
    }

    /// Two-sided p-value of a t statistic with `df` degrees of freedom
    pub fn students_t_two_sided(t: f64, df: f64) -> Result<f64> {
        if t.is_nan() {
            return Err(Error::Computation("t statistic is NaN".to_string()));
        }
        if t.is_infinite() {
            return Ok(0.0);
        }
        let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| dist_error("Student-t", e))?;
        Ok((2.0 * dist.cdf(-t.abs())).clamp(0.0, 1.0))
    }

    /// Upper tail probability of a chi-squared statistic
    pub fn chi_squared_sf(x: f64, df: f64) -> Result<f64> {
        if x.is_nan() {
            return Err(Error::Computation("chi-squared statistic is NaN".to_string()));
        }
        if x.is_infinite() {
            return Ok(0.0);
        }
        if x <= 0.0 {
            return Ok(1.0);
        }
        let dist = ChiSquared::new(df).map_err(|e| dist_error("chi-squared", e))?;
        Ok((1.0 - dist.cdf(x)).clamp(0.0, 1.0))
    }

    /// Upper tail probability of an F statistic with (`df1`, `df2`) degrees of freedom
    pub fn fisher_sf(f: f64, df1: f64, df2: f64) -> Result<f64> {
        if f.is_nan() {
            return Err(Error::Computation("F statistic is NaN".to_string()));
        }
        if f.is_infinite() {
            return Ok(0.0);
        }
        if f <= 0.0 {
            return Ok(1.0);
        }
        let dist = FisherSnedecor::new(df1, df2).map_err(|e| dist_error("F", e))?;
        Ok((1.0 - dist.cdf(f)).clamp(0.0, 1.0))
    }
}

/// Evaluate `c[0] + c[1]·x + c[2]·x² + …` by Horner's method
pub fn polyval(coefficients: &[f64], x: f64) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, &c| acc * x + c)
}
