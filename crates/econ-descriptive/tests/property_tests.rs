//! Property-based tests for descriptive statistics and correlation

use econ_descriptive::{pearson, quantile_linear, DescriptiveStats};
use proptest::prelude::*;

fn finite_vec(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1e6f64..1e6, min_len..max_len)
}

fn has_variance(v: &[f64]) -> bool {
    v.iter().any(|&x| (x - v[0]).abs() > 1e-3)
}

proptest! {
    #[test]
    fn pearson_is_symmetric_and_bounded(
        (x, y) in (3usize..60).prop_flat_map(|n| {
            (prop::collection::vec(-1e6f64..1e6, n), prop::collection::vec(-1e6f64..1e6, n))
        })
    ) {
        prop_assume!(has_variance(&x) && has_variance(&y));

        let r_xy = pearson(&x, &y).unwrap();
        let r_yx = pearson(&y, &x).unwrap();

        prop_assert!((-1.0..=1.0).contains(&r_xy));
        prop_assert!((r_xy - r_yx).abs() < 1e-12);
    }

    #[test]
    fn pearson_with_itself_is_one(x in finite_vec(3, 60)) {
        prop_assume!(has_variance(&x));
        let r = pearson(&x, &x).unwrap();
        prop_assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn quartiles_are_ordered(x in finite_vec(1, 200)) {
        let s = DescriptiveStats::compute(&x).unwrap();
        let tol = 1e-9 * s.max.abs().max(s.min.abs()).max(1.0);
        prop_assert!(s.min <= s.q1 + tol);
        prop_assert!(s.q1 <= s.median + tol);
        prop_assert!(s.median <= s.q3 + tol);
        prop_assert!(s.q3 <= s.max + tol);
        prop_assert!(s.variance >= 0.0);
    }

    #[test]
    fn quantile_is_monotone(x in finite_vec(1, 100), p1 in 0.0f64..=1.0, p2 in 0.0f64..=1.0) {
        let mut sorted = x.clone();
        sorted.sort_by(f64::total_cmp);
        let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
        let q_lo = quantile_linear(&sorted, lo).unwrap();
        let q_hi = quantile_linear(&sorted, hi).unwrap();
        prop_assert!(q_lo <= q_hi + 1e-9 * q_hi.abs().max(1.0));
    }
}
