//! Auxiliary regressions behind the Lagrange-multiplier tests

use econ_core::math::distributions::{chi_squared_sf, fisher_sf};
use econ_core::{Error, Result};
use econ_regression::{solve_least_squares, DesignMatrix, LeastSquaresFit};
use tracing::debug;

/// Fit of a residual-based auxiliary regression
#[derive(Debug, Clone)]
pub struct AuxiliaryFit {
    pub fit: LeastSquaresFit,
    pub r_squared: f64,
    /// `n·R²`
    pub lm_statistic: f64,
}

impl AuxiliaryFit {
    pub fn n_observations(&self) -> usize {
        self.fit.n_observations
    }

    pub fn df_resid(&self) -> usize {
        self.fit.df_resid()
    }
}

/// Regress `response` on `design` (which must contain an intercept)
///
/// A constant response has zero total variation; its R² and LM statistic
/// are reported as zero.
pub fn fit_auxiliary(design: &DesignMatrix, response: &[f64]) -> Result<AuxiliaryFit> {
    if !design.has_intercept() {
        return Err(Error::InvalidParameter(
            "auxiliary regression design must start with an intercept column".to_string(),
        ));
    }
    if response.len() != design.nrows() {
        return Err(Error::size_mismatch(design.nrows(), response.len(), "auxiliary regression"));
    }
    if design.nrows() <= design.ncols() {
        return Err(Error::insufficient(
            "auxiliary regression",
            design.ncols() + 1,
            design.nrows(),
        ));
    }

    let fit = solve_least_squares(design, response)?;
    let r_squared = fit.r_squared();
    let lm_statistic = fit.n_observations as f64 * r_squared;
    debug!(
        columns = design.ncols(),
        r_squared,
        lm_statistic,
        "auxiliary regression"
    );

    Ok(AuxiliaryFit {
        fit,
        r_squared,
        lm_statistic,
    })
}

/// LM p-value against χ²(`df`)
pub fn lm_p_value(lm_statistic: f64, df: usize) -> Result<f64> {
    chi_squared_sf(lm_statistic, df as f64)
}

/// p-value of an F statistic with (`df1`, `df2`) degrees of freedom
pub fn f_p_value(f_statistic: f64, df1: usize, df2: usize) -> Result<f64> {
    fisher_sf(f_statistic, df1 as f64, df2 as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_lm_is_n_times_r_squared() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 5.0];
        let aux = fit_auxiliary(&DesignMatrix::with_intercept(&x), &y).unwrap();
        assert_abs_diff_eq!(aux.r_squared, 0.64, epsilon = 1e-12);
        assert_abs_diff_eq!(aux.lm_statistic, 3.2, epsilon = 1e-12);
        assert_eq!(aux.df_resid(), 3);
    }

    #[test]
    fn test_constant_response_has_zero_lm() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let aux = fit_auxiliary(&DesignMatrix::with_intercept(&x), &[2.0; 4]).unwrap();
        assert_eq!(aux.r_squared, 0.0);
        assert_eq!(aux.lm_statistic, 0.0);
        assert_eq!(lm_p_value(aux.lm_statistic, 1).unwrap(), 1.0);
        assert_eq!(aux.fit.f_statistic(), 0.0);
    }

    #[test]
    fn test_requires_intercept() {
        let design =
            DesignMatrix::from_columns(vec![("x".to_string(), vec![1.0, 2.0, 3.0])]).unwrap();
        assert!(matches!(
            fit_auxiliary(&design, &[1.0, 2.0, 3.0]),
            Err(Error::InvalidParameter(_))
        ));
    }
}
