//! Provides the `LineSearch` trait.


/// A scalar minimizer over a bounded interval.
///
/// Given an interval and a one-dimensional objective,
/// an implementation returns an approximate minimizer together
/// with the objective value there.
/// Implementations must be deterministic for a fixed objective
/// and interval; the boosting step-size selection relies on it.
///
/// The trait is object safe so that an ensemble builder can hold
/// any optimizer behind a `Box<dyn LineSearch>`.
pub trait LineSearch {
    /// Returns `(argmin, min)` of `objective` over
    /// the closed interval `interval`.
    fn minimize(
        &self,
        interval: (f64, f64),
        objective: &dyn Fn(f64) -> f64,
    ) -> (f64, f64);
}
