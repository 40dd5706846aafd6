//! Provides the `Booster` trait.

use crate::base_learner::{
    BaseLearner,
    LearnerBuilder,
};

use std::ops::ControlFlow;


/// The trait [`Booster`](Booster) defines the standard framework of
/// ensemble construction in this crate.
///
/// You need to implement [`Booster::preprocess`](Booster::preprocess),
/// [`Booster::boost`](Booster::boost),
/// and [`Booster::postprocess`](Booster::postprocess)
/// to write a new ensemble algorithm.
/// Each call to `boost` trains one ensemble member;
/// iterations are inherently sequential since every step depends on
/// the state left behind by the previous one.
pub trait Booster<L>
    where L: BaseLearner,
{
    /// The trained ensemble this algorithm produces.
    type Output;

    /// A main function that runs the ensemble construction.
    fn run<W>(
        &mut self,
        builder: &W,
    ) -> Self::Output
        where W: LearnerBuilder<Learner = L>
    {
        self.preprocess(builder);

        let _ = (1..).try_for_each(|iter| {
            self.boost(builder, iter)
        });

        self.postprocess(builder)
    }


    /// Pre-processing for `self`.
    /// As you can see in [`Booster::run`](Booster::run),
    /// this method is called before the construction process.
    fn preprocess<W>(
        &mut self,
        builder: &W,
    )
        where W: LearnerBuilder<Learner = L>;


    /// Construction step per iteration.
    /// Trains the `iteration`-th ensemble member and returns
    /// `ControlFlow::Continue(())` if construction should go on,
    /// `ControlFlow::Break(terminated_iter)` otherwise.
    fn boost<W>(
        &mut self,
        builder: &W,
        iteration: usize,
    ) -> ControlFlow<usize>
        where W: LearnerBuilder<Learner = L>;


    /// Post-processing.
    /// This method returns the trained ensemble.
    fn postprocess<W>(
        &mut self,
        builder: &W,
    ) -> Self::Output
        where W: LearnerBuilder<Learner = L>;
}
