//! Provides the `BaseLearner` and `LearnerBuilder` traits.


/// The capability set every trainable model must provide to take part
/// in an ensemble.
///
/// The ensemble builders depend only on this trait,
/// never on a concrete model type.
/// A conforming implementation is used like this:
///
/// 1. call [`add_case`](BaseLearner::add_case) or
///    [`add_weighted_case`](BaseLearner::add_weighted_case)
///    once per training case,
/// 2. call [`train`](BaseLearner::train),
/// 3. call [`predict`](BaseLearner::predict) as often as desired,
/// 4. optionally call [`reset`](BaseLearner::reset) and start over.
///
/// `predict` may return an unbounded value;
/// the ensemble layer clips to `[-1, 1]` at every consumption point.
/// Models behave best when `[-1, 1]` already is their natural range,
/// so that the clipping has little or no impact.
pub trait BaseLearner {
    /// Discards any accumulated training data.
    /// Must be called before reusing a trained instance
    /// on a new training set.
    fn reset(&mut self);


    /// Appends one training case with importance `1.0`.
    /// Must not be called after [`train`](BaseLearner::train)
    /// without an intervening [`reset`](BaseLearner::reset).
    fn add_case(&mut self, input: &[f64], target: f64) {
        self.add_weighted_case(input, target, 1.0);
    }


    /// Appends one training case with the given non-negative
    /// importance weight.
    fn add_weighted_case(&mut self, input: &[f64], target: f64, importance: f64);


    /// Fits the model to all cases added since the last
    /// [`reset`](BaseLearner::reset).
    fn train(&mut self);


    /// Produces a raw prediction for `input`.
    fn predict(&self, input: &[f64]) -> f64;
}


/// A factory that produces fresh, mutually independent
/// [`BaseLearner`] instances.
///
/// Every model slot of an ensemble is created through this trait,
/// owned exclusively by the member/class pair that requested it,
/// and dropped together with the ensemble.
///
/// ```
/// use arcboost::prelude::*;
///
/// let builder = GrnnBuilder::new(2).seed(7);
/// let _slot = builder.build();
/// ```
pub trait LearnerBuilder {
    /// The learner type this factory produces.
    type Learner: BaseLearner;

    /// Produces one fresh, untrained learner instance.
    fn build(&self) -> Self::Learner;
}
