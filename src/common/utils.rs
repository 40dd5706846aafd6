//! This file provides some common functions
//! such as output clipping and distribution normalization.
use rayon::prelude::*;


/// Clips a raw learner output into `[-1.0, 1.0]`.
/// Every place that consumes a raw prediction goes through this,
/// so a learner whose natural range exceeds `[-1, 1]` stays harmless.
#[inline(always)]
pub(crate) fn clip(h: f64) -> f64 {
    h.clamp(-1.0, 1.0)
}


/// Returns the index of the largest entry of `values`.
/// Ties are broken by the lowest index (the first maximum wins).
#[inline(always)]
pub(crate) fn argmax_first(values: &[f64]) -> usize {
    assert!(!values.is_empty());

    let mut best = values[0];
    let mut ibest = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > best {
            best = v;
            ibest = i;
        }
    }
    ibest
}


/// Rescales `items` so that the entries sum to one.
#[inline(always)]
pub(crate) fn normalize(items: &mut [f64]) {
    let z = items.iter()
        .map(|it| it.abs())
        .sum::<f64>();

    assert_ne!(z, 0.0);

    items.par_iter_mut()
        .for_each(|item| { *item /= z; });
}


/// Computes `sum_i dist[i] * exp(-alpha * u[i])`,
/// the objective minimized by the step-size line search.
#[inline(always)]
pub(crate) fn weighted_exp_sum(alpha: f64, dist: &[f64], u: &[f64]) -> f64 {
    dist.par_iter()
        .zip(u)
        .map(|(d, ui)| d * (-alpha * ui).exp())
        .sum::<f64>()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_breaks_ties_by_lowest_index() {
        assert_eq!(argmax_first(&[0.5, 1.0, 1.0, 0.2]), 1);
        assert_eq!(argmax_first(&[2.0, 2.0]), 0);
        assert_eq!(argmax_first(&[-3.0]), 0);
    }

    #[test]
    fn clip_limits_both_sides() {
        assert_eq!(clip(7.5), 1.0);
        assert_eq!(clip(-7.5), -1.0);
        assert_eq!(clip(0.25), 0.25);
    }

    #[test]
    fn normalize_sums_to_one() {
        let mut v = vec![1.0, 3.0, 4.0];
        normalize(&mut v);
        assert!((v.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!((v[2] - 0.5).abs() < 1e-12);
    }
}
