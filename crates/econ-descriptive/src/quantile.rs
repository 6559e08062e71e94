//! Linear-interpolation quantiles
//!
//! Position `h = (n - 1)·p` on the sorted sample, interpolating between the
//! order statistics at `⌊h⌋` and `⌈h⌉` (Hyndman & Fan type 7).

use econ_core::{Error, Result};

/// Quantile of an already sorted sample
///
/// # Examples
///
/// ```rust
/// use econ_descriptive::quantile_linear;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(quantile_linear(&sorted, 0.5).unwrap(), 2.5);
/// assert_eq!(quantile_linear(&sorted, 0.25).unwrap(), 1.75);
/// ```
pub fn quantile_linear(sorted: &[f64], p: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::InvalidParameter(format!(
            "quantile probability must be in [0, 1], got {p}"
        )));
    }
    if sorted.is_empty() {
        return Err(Error::insufficient("quantile", 1, 0));
    }

    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - lo as f64;

    Ok(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Several quantiles of the same sorted sample
pub fn quantiles_linear(sorted: &[f64], probabilities: &[f64]) -> Result<Vec<f64>> {
    probabilities
        .iter()
        .map(|&p| quantile_linear(sorted, p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_quantile_endpoints() {
        let sorted = [1.0, 3.0, 7.0, 20.0];
        assert_eq!(quantile_linear(&sorted, 0.0).unwrap(), 1.0);
        assert_eq!(quantile_linear(&sorted, 1.0).unwrap(), 20.0);
    }

    #[test]
    fn test_quantile_interpolation() {
        // h = 9 * 0.25 = 2.25 -> 3 + 0.25 * (4 - 3)
        let sorted: Vec<f64> = (1..=10).map(f64::from).collect();
        assert_abs_diff_eq!(quantile_linear(&sorted, 0.25).unwrap(), 3.25, epsilon = 1e-12);
        assert_abs_diff_eq!(quantile_linear(&sorted, 0.5).unwrap(), 5.5, epsilon = 1e-12);
        assert_abs_diff_eq!(quantile_linear(&sorted, 0.75).unwrap(), 7.75, epsilon = 1e-12);
    }

    #[test]
    fn test_quantile_single_value() {
        assert_eq!(quantile_linear(&[4.2], 0.3).unwrap(), 4.2);
    }

    #[test]
    fn test_quantile_invalid_probability() {
        assert!(matches!(
            quantile_linear(&[1.0, 2.0], 1.5),
            Err(Error::InvalidParameter(_))
        ));
        assert!(quantile_linear(&[1.0, 2.0], -0.1).is_err());
        assert!(quantile_linear(&[1.0, 2.0], f64::NAN).is_err());
        assert!(matches!(
            quantile_linear(&[], 0.5),
            Err(Error::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_quantiles_linear() {
        let sorted = [10.0, 20.0, 30.0];
        let q = quantiles_linear(&sorted, &[0.0, 0.5, 1.0]).unwrap();
        assert_eq!(q, vec![10.0, 20.0, 30.0]);
    }
}
