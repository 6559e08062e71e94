//! Bivariate linear regression for the econometric diagnostics pipeline
//!
//! All estimators solve least squares by Householder QR on the design
//! matrix ([`solver::solve_least_squares`]) and reject ill-conditioned
//! designs before solving.
//!
//! # Example
//!
//! ```rust
//! use econ_regression::{OrdinaryLeastSquares, WeightedLeastSquares};
//!
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let y = [1.1, 2.3, 2.8, 4.2, 4.9, 6.3];
//!
//! let ols = OrdinaryLeastSquares::new().fit(&x, &y).unwrap();
//! let wls = WeightedLeastSquares::from_residuals(&ols.residuals)
//!     .unwrap()
//!     .fit(&x, &y)
//!     .unwrap();
//! assert!(ols.r_squared > 0.9);
//! assert_eq!(wls.n_observations, 6);
//! ```

pub mod design;
pub mod ols;
pub mod solver;
pub mod types;
pub mod wls;

pub use design::DesignMatrix;
pub use ols::{OrdinaryLeastSquares, DEFAULT_CONDITION_THRESHOLD};
pub use solver::{condition_number, solve_least_squares, LeastSquaresFit};
pub use types::{EstimationMethod, RegressionResult};
pub use wls::WeightedLeastSquares;
