//! Utility functions for working with data slices

/// Sort data and return a new vector
///
/// NaN values are placed at the end.
///
/// # Examples
///
/// ```rust
/// use econ_core::utils::sorted;
///
/// let data = vec![3.0, 1.0, 5.0, 2.0, 4.0];
/// assert_eq!(sorted(&data), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| match (a.is_nan(), b.is_nan()) {
        (true, true) => std::cmp::Ordering::Equal,
        (true, false) => std::cmp::Ordering::Greater,
        (false, true) => std::cmp::Ordering::Less,
        (false, false) => a.total_cmp(b),
    });
    sorted
}

/// Calculate the mean of a slice
///
/// Returns 0.0 for empty slices.
///
/// # Examples
///
/// ```rust
/// use econ_core::utils::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
/// assert_eq!(mean(&[]), 0.0);
/// ```
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sum of squared deviations from the mean
pub fn sum_squared_deviations(data: &[f64]) -> f64 {
    let m = mean(data);
    data.iter().map(|&x| (x - m) * (x - m)).sum()
}

/// Sample variance (divisor n - 1)
///
/// Returns 0.0 for slices with less than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    sum_squared_deviations(data) / (data.len() - 1) as f64
}

/// Calculate the sample standard deviation
///
/// Returns 0.0 for slices with less than 2 elements.
///
/// # Examples
///
/// ```rust
/// use econ_core::utils::std_dev;
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let sd = std_dev(&data);
/// assert!((sd - 1.58113883).abs() < 1e-6);
/// ```
pub fn std_dev(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Plain sum of squares
pub fn sum_of_squares(data: &[f64]) -> f64 {
    data.iter().map(|&x| x * x).sum()
}

/// Check that two slices have the same length
pub fn check_same_len(a: &[f64], b: &[f64], context: &str) -> crate::Result<()> {
    if a.len() != b.len() {
        return Err(crate::Error::size_mismatch(a.len(), b.len(), context));
    }
    Ok(())
}

/// Check that every value is finite
pub fn check_finite(data: &[f64], context: &str) -> crate::Result<()> {
    if data.iter().any(|v| !v.is_finite()) {
        return Err(crate::Error::non_finite(context));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_sorted_basic() {
        let data = vec![3.0, -1.0, 0.0, -5.0, 2.0];
        assert_eq!(sorted(&data), vec![-5.0, -1.0, 0.0, 2.0, 3.0]);
    }

    #[test]
    fn test_sorted_empty() {
        assert_eq!(sorted(&[]), Vec::<f64>::new());
    }

    #[test]
    fn test_sorted_with_nan() {
        let s = sorted(&[3.0, f64::NAN, 1.0, 2.0]);
        assert_eq!(&s[..3], &[1.0, 2.0, 3.0]);
        assert!(s[3].is_nan());
    }

    #[test]
    fn test_variance_and_std_dev() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_abs_diff_eq!(mean(&data), 5.0);
        assert_abs_diff_eq!(sum_squared_deviations(&data), 32.0);
        assert_abs_diff_eq!(variance(&data), 32.0 / 7.0, epsilon = 1e-12);
        assert_abs_diff_eq!(std_dev(&data), (32.0f64 / 7.0).sqrt(), epsilon = 1e-12);
        assert_eq!(variance(&[1.0]), 0.0);
    }

    #[test]
    fn test_sum_of_squares() {
        assert_eq!(sum_of_squares(&[1.0, -2.0, 3.0]), 14.0);
    }

    #[test]
    fn test_checks() {
        assert!(check_same_len(&[1.0], &[1.0, 2.0], "predictor").is_err());
        assert!(check_same_len(&[1.0], &[2.0], "predictor").is_ok());
        assert!(check_finite(&[1.0, f64::NAN], "x").is_err());
        assert!(check_finite(&[1.0, 2.0], "x").is_ok());
    }
}
