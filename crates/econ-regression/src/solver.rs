//! Householder QR least-squares solver
//!
//! `XᵀX` is never formed or inverted. Coefficients come from `Rβ = Qᵀy` and
//! the unscaled covariance from `R⁻¹R⁻ᵀ`.

use crate::design::DesignMatrix;
use econ_core::utils::{check_finite, mean};
use econ_core::{Error, Result};
use nalgebra::{DMatrix, DVector};
use tracing::debug;

/// Solution of a least-squares problem `y ≈ Xβ`
#[derive(Debug, Clone)]
pub struct LeastSquaresFit {
    pub coefficients: Vec<f64>,
    pub residuals: Vec<f64>,
    pub fitted_values: Vec<f64>,
    /// Residual sum of squares
    pub rss: f64,
    /// Total sum of squares about the mean of `y`
    pub tss: f64,
    /// `(XᵀX)⁻¹`
    pub cov_unscaled: DMatrix<f64>,
    pub n_observations: usize,
    pub n_parameters: usize,
}

impl LeastSquaresFit {
    pub fn df_resid(&self) -> usize {
        self.n_observations - self.n_parameters
    }

    /// Centered R², zero when `y` is constant
    pub fn r_squared(&self) -> f64 {
        if self.tss <= 0.0 {
            return 0.0;
        }
        (1.0 - self.rss / self.tss).clamp(0.0, 1.0)
    }

    /// Overall F statistic of a model with intercept, `(ESS/(k-1)) / (RSS/(n-k))`
    pub fn f_statistic(&self) -> f64 {
        let df_model = (self.n_parameters - 1) as f64;
        let df_resid = self.df_resid() as f64;
        let ess = (self.tss - self.rss).max(0.0);
        if ess == 0.0 {
            return 0.0;
        }
        if self.rss == 0.0 {
            return f64::INFINITY;
        }
        (ess / df_model) / (self.rss / df_resid)
    }

    /// Standard errors for an error variance `sigma2`
    pub fn standard_errors(&self, sigma2: f64) -> Vec<f64> {
        (0..self.n_parameters)
            .map(|j| (sigma2 * self.cov_unscaled[(j, j)]).max(0.0).sqrt())
            .collect()
    }
}

/// Solve `y ≈ Xβ` by Householder QR
///
/// Requires more rows than columns and a full-rank design.
pub fn solve_least_squares(design: &DesignMatrix, y: &[f64]) -> Result<LeastSquaresFit> {
    let n = design.nrows();
    let k = design.ncols();
    if y.len() != n {
        return Err(Error::size_mismatch(n, y.len(), "least-squares response"));
    }
    if n <= k {
        return Err(Error::insufficient("least-squares fit", k + 1, n));
    }
    check_finite(y, "least-squares response")?;
    check_finite(design.matrix().as_slice(), "design matrix")?;

    let x = design.matrix();
    let qr = x.clone().qr();
    let q = qr.q();
    let r = qr.r();

    let max_diag = (0..k).map(|j| r[(j, j)].abs()).fold(0.0, f64::max);
    let tolerance = max_diag * f64::EPSILON * n.max(k) as f64;
    if let Some(j) = (0..k).find(|&j| r[(j, j)].abs() <= tolerance) {
        return Err(Error::singular(
            "least-squares fit",
            format!("column '{}' is linearly dependent on the others", design.names()[j]),
        ));
    }

    let y_vec = DVector::from_column_slice(y);
    let qty = q.transpose() * &y_vec;
    let beta = r
        .solve_upper_triangular(&qty)
        .ok_or_else(|| Error::Computation("triangular solve failed".to_string()))?;
    let r_inv = r
        .solve_upper_triangular(&DMatrix::identity(k, k))
        .ok_or_else(|| Error::Computation("triangular inverse failed".to_string()))?;
    let cov_unscaled = &r_inv * r_inv.transpose();

    let fitted = x * &beta;
    let residuals: Vec<f64> = y.iter().zip(fitted.iter()).map(|(yi, fi)| yi - fi).collect();
    let rss = residuals.iter().map(|e| e * e).sum();
    let y_mean = mean(y);
    let tss = y.iter().map(|v| (v - y_mean) * (v - y_mean)).sum();

    Ok(LeastSquaresFit {
        coefficients: beta.iter().copied().collect(),
        residuals,
        fitted_values: fitted.iter().copied().collect(),
        rss,
        tss,
        cov_unscaled,
        n_observations: n,
        n_parameters: k,
    })
}

/// 2-norm condition number of the column-equilibrated design
///
/// Each column is scaled to unit length first, so the number reflects
/// collinearity rather than the units of the regressors.
pub fn condition_number(design: &DesignMatrix) -> f64 {
    let x = design.matrix();
    let mut scaled = x.clone();
    for mut col in scaled.column_iter_mut() {
        let norm = col.norm();
        if norm > 0.0 {
            col /= norm;
        }
    }

    let singular_values = scaled.svd(false, false).singular_values;
    let max = singular_values.iter().copied().fold(0.0, f64::max);
    let min = singular_values.iter().copied().fold(f64::INFINITY, f64::min);
    let cond = if min > 0.0 { max / min } else { f64::INFINITY };
    debug!(condition_number = cond, "design condition number");
    cond
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_exact_line() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y: Vec<f64> = x.iter().map(|v| 3.0 * v - 1.0).collect();
        let fit = solve_least_squares(&DesignMatrix::with_intercept(&x), &y).unwrap();

        assert_abs_diff_eq!(fit.coefficients[0], -1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(fit.coefficients[1], 3.0, epsilon = 1e-10);
        assert_abs_diff_eq!(fit.rss, 0.0, epsilon = 1e-18);
        assert_abs_diff_eq!(fit.r_squared(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_known_regression() {
        // Hand-computed: x̄ = 3, ȳ = 3, Sxy = 8, Sxx = 10
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 5.0];
        let fit = solve_least_squares(&DesignMatrix::with_intercept(&x), &y).unwrap();

        assert_abs_diff_eq!(fit.coefficients[1], 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.coefficients[0], 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.tss, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.rss, 10.0 - 6.4, epsilon = 1e-12);
        // (XᵀX)⁻¹ for this design: [[1.1, -0.3], [-0.3, 0.1]]
        assert_abs_diff_eq!(fit.cov_unscaled[(0, 0)], 1.1, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.cov_unscaled[(0, 1)], -0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.cov_unscaled[(1, 1)], 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.f_statistic(), 6.4 / (3.6 / 3.0), epsilon = 1e-10);
        assert_eq!(fit.df_resid(), 3);
    }

    #[test]
    fn test_collinear_columns_are_singular() {
        let design = DesignMatrix::from_columns(vec![
            ("const".to_string(), vec![1.0; 5]),
            ("x".to_string(), vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            ("x2".to_string(), vec![2.0, 4.0, 6.0, 8.0, 10.0]),
        ])
        .unwrap();
        let y = [1.0, 3.0, 2.0, 5.0, 4.0];
        assert!(matches!(
            solve_least_squares(&design, &y),
            Err(Error::SingularDesignMatrix { .. })
        ));
    }

    #[test]
    fn test_too_few_rows() {
        let design = DesignMatrix::with_intercept(&[1.0, 2.0]);
        assert!(matches!(
            solve_least_squares(&design, &[1.0, 2.0]),
            Err(Error::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_condition_number() {
        let orthogonal = DesignMatrix::from_columns(vec![
            ("a".to_string(), vec![1.0, 0.0]),
            ("b".to_string(), vec![0.0, 5.0]),
        ])
        .unwrap();
        assert_abs_diff_eq!(condition_number(&orthogonal), 1.0, epsilon = 1e-12);

        let nearly_collinear = DesignMatrix::with_intercept(&[1.0, 1.0 + 1e-9, 1.0 - 1e-9]);
        assert!(condition_number(&nearly_collinear) > 1e8);

        let constant = DesignMatrix::with_intercept(&[2.0, 2.0, 2.0]);
        assert!(condition_number(&constant) > 1e12);
    }
}
