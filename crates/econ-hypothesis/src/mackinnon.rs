//! MacKinnon response surfaces for the Dickey-Fuller distribution
//!
//! Constant-only model with one integrated variable. p-values follow the
//! 1994 approximation, critical values the 2010 finite-sample tables.

use crate::types::CriticalValues;
use econ_core::math::distributions::normal;
use econ_core::math::polyval;

const TAU_MAX: f64 = 2.74;
const TAU_MIN: f64 = -18.83;
const TAU_STAR: f64 = -1.61;
const SMALL_P: [f64; 3] = [2.1659, 1.4412, 0.038269];
const LARGE_P: [f64; 4] = [1.7339, 0.93202, -0.12745, -0.010368];

const CRIT_1: [f64; 4] = [-3.43035, -6.5393, -16.786, -79.433];
const CRIT_5: [f64; 4] = [-2.86154, -2.8903, -4.234, -40.040];
const CRIT_10: [f64; 4] = [-2.56677, -1.5384, -2.809, 0.0];

/// Approximate p-value of an ADF t statistic
pub fn p_value(tau: f64) -> f64 {
    if tau > TAU_MAX {
        return 1.0;
    }
    if tau < TAU_MIN {
        return 0.0;
    }
    let coefficients: &[f64] = if tau <= TAU_STAR { &SMALL_P } else { &LARGE_P };
    normal::cdf(polyval(coefficients, tau))
}

/// Critical values for a test regression with `n_obs` rows
pub fn critical_values(n_obs: usize) -> CriticalValues {
    let inv_n = 1.0 / n_obs as f64;
    CriticalValues {
        one_percent: polyval(&CRIT_1, inv_n),
        five_percent: polyval(&CRIT_5, inv_n),
        ten_percent: polyval(&CRIT_10, inv_n),
    }
}
