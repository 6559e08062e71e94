//! Shapiro-Wilk normality test
//!
//! Royston's AS R94 approximation: coefficients from Blom scores with
//! polynomial corrections of the outermost one or two weights, and a
//! normalising transform of `ln(1 - W)` for the p-value.

use crate::types::NormalityResult;
use econ_core::math::distributions::normal;
use econ_core::math::polyval;
use econ_core::utils::{check_finite, sorted, sum_squared_deviations};
use econ_core::{Error, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::f64::consts::PI;
use tracing::debug;

/// Largest sample the approximation is calibrated for
pub const DEFAULT_SAMPLE_CAP: usize = 5000;
pub const DEFAULT_SEED: u64 = 42;

const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

/// Shapiro-Wilk test with deterministic sub-sampling of large inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapiroWilk {
    significance_level: f64,
    sample_cap: usize,
    seed: u64,
}

impl ShapiroWilk {
    pub fn new(significance_level: f64) -> Self {
        Self {
            significance_level,
            sample_cap: DEFAULT_SAMPLE_CAP,
            seed: DEFAULT_SEED,
        }
    }

    /// Inputs longer than `cap` are reduced to `cap` points drawn without replacement
    pub fn with_sample_cap(mut self, cap: usize) -> Self {
        self.sample_cap = cap;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn test(&self, data: &[f64]) -> Result<NormalityResult> {
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "significance level must be in (0, 1), got {}",
                self.significance_level
            )));
        }
        if self.sample_cap < 3 {
            return Err(Error::InvalidParameter(format!(
                "Shapiro-Wilk sample cap must be at least 3, got {}",
                self.sample_cap
            )));
        }
        check_finite(data, "Shapiro-Wilk input")?;
        if data.len() < 3 {
            return Err(Error::insufficient("Shapiro-Wilk", 3, data.len()));
        }

        let x = sorted(&self.subsample(data));
        let n = x.len();
        if x[n - 1] - x[0] == 0.0 {
            return Err(Error::degenerate("Shapiro-Wilk", "all values are identical"));
        }

        let (statistic, p_value) = if n == 3 {
            exact_three_point(&x)
        } else {
            let a = coefficients(n)?;
            let w = statistic(&x, &a);
            (w, p_value(w, n))
        };
        let p_value = p_value.clamp(0.0, 1.0);
        debug!(n, statistic, p_value, "Shapiro-Wilk");

        Ok(NormalityResult {
            statistic,
            p_value,
            is_normal: p_value > self.significance_level,
            sample_size: n,
        })
    }

    fn subsample(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.sample_cap {
            return data.to_vec();
        }
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut indices = rand::seq::index::sample(&mut rng, data.len(), self.sample_cap).into_vec();
        // Keep the original order of the drawn points
        indices.sort_unstable();
        debug!(from = data.len(), to = self.sample_cap, "Shapiro-Wilk sub-sample");
        indices.into_iter().map(|i| data[i]).collect()
    }
}

/// W and its exact p-value for three points
fn exact_three_point(x: &[f64]) -> (f64, f64) {
    let ss = sum_squared_deviations(x);
    let numerator = std::f64::consts::FRAC_1_SQRT_2 * (x[2] - x[0]);
    let w = (numerator * numerator / ss).clamp(0.75, 1.0);
    let p = 6.0 / PI * (w.sqrt().asin() - 0.75f64.sqrt().asin());
    (w, p)
}

/// Antisymmetric weights `a_1..a_{n/2}` for the lower half of the order statistics
fn coefficients(n: usize) -> Result<Vec<f64>> {
    let half = n / 2;
    let nf = n as f64;

    let m: Vec<f64> = (0..half)
        .map(|i| normal::ppf((i as f64 + 1.0 - 0.375) / (nf + 0.25)))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / nf.sqrt();

    let a1 = polyval(&C1, rsn) - m[0] / ssumm2;
    let mut a = vec![0.0; half];
    a[0] = a1;

    // n <= 5 corrects only the outermost weight
    let corrected = if n <= 5 { 1 } else { 2 };
    let (fac_sq, one_minus) = if corrected == 1 {
        (summ2 - 2.0 * m[0] * m[0], 1.0 - 2.0 * a1 * a1)
    } else {
        let a2 = -m[1] / ssumm2 + polyval(&C2, rsn);
        a[1] = a2;
        (
            summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1],
            1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2,
        )
    };
    if fac_sq <= 0.0 || one_minus <= 0.0 {
        return Err(Error::Computation(format!(
            "Shapiro-Wilk coefficients are undefined for n = {n}"
        )));
    }

    let fac = (fac_sq / one_minus).sqrt();
    for i in corrected..half {
        a[i] = -m[i] / fac;
    }
    Ok(a)
}

fn statistic(x: &[f64], a: &[f64]) -> f64 {
    let n = x.len();
    let numerator: f64 = a
        .iter()
        .enumerate()
        .map(|(i, ai)| ai * (x[n - 1 - i] - x[i]))
        .sum();
    (numerator * numerator / sum_squared_deviations(x)).min(1.0)
}

fn p_value(w: f64, n: usize) -> f64 {
    let w1 = 1.0 - w;
    if w1 <= 0.0 {
        return 1.0;
    }
    let y = w1.ln();
    let nf = n as f64;

    let (z_input, mean, sd) = if n <= 11 {
        let gamma = polyval(&G, nf);
        if y >= gamma {
            return 0.0;
        }
        (-(gamma - y).ln(), polyval(&C3, nf), polyval(&C4, nf).exp())
    } else {
        let ln_n = nf.ln();
        (y, polyval(&C5, ln_n), polyval(&C6, ln_n).exp())
    };

    normal::sf((z_input - mean) / sd)
}
