//! This file defines some functions that check some pre-conditions
//! E.g., label shape, distribution validity

use crate::Sample;


const DISTRIBUTION_TOLERANCE: f64 = 1e-9;


/// Check whether the training sample is valid or not.
/// Every label row must contain exactly one `+1` with
/// all remaining entries equal to `-1`.
#[inline(always)]
pub(crate) fn check_sample(sample: &Sample) {
    let (n_sample, n_feature) = sample.shape();

    assert!(n_sample > 0);
    assert!(n_feature > 0);

    for i in 0..n_sample {
        let row = sample.label(i);
        let n_pos = row.iter().filter(|&&y| y > 0.0).count();
        assert_eq!(
            n_pos, 1,
            "label row {i} must have exactly one positive entry"
        );
        assert!(
            row.iter().all(|&y| y == 1.0 || y == -1.0),
            "label row {i} contains a value other than +1/-1"
        );
    }
}


/// Check whether the number of classes suffices for classification.
#[inline(always)]
pub(crate) fn check_n_class(n_class: usize) {
    assert!(n_class >= 2, "classification requires at least two classes");
}


/// Check whether `dist` is a probability distribution:
/// non-negative entries summing to one.
#[inline(always)]
pub(crate) fn check_distribution(dist: &[f64]) {
    let sum = dist.iter().sum::<f64>();
    assert!(
        (sum - 1f64).abs() < DISTRIBUTION_TOLERANCE,
        "sum(dist[..]) = {sum}"
    );
    assert!(
        dist.iter().all(|&d| d >= 0.0),
        "distribution contains a negative entry"
    );
}
