//! Provides [`AdaBoostOC`](AdaBoostOC),
//! output-coded multiclass boosting by Schapire, 1997.
//!
//! The underlying learner only needs to get a binary decision right;
//! the sign of its output is used and the magnitude ignored.
//! The original formulation colors classes with `{0, 1}`;
//! this implementation uses `{-1, +1}` since many models train
//! better with symmetric targets. The mathematics is identical.
use colored::Colorize;
use rayon::prelude::*;

use crate::{
    Sample,
    Booster,

    base_learner::{BaseLearner, LearnerBuilder},
    common::{utils, checker},
};

use super::coloring::{
    self,
    Coloring,
    ColoringStrategy,
};

use std::mem;
use std::ops::ControlFlow;


const DEFAULT_ENSEMBLE_SIZE: usize = 10;
const DEFAULT_SEED: u64 = 1234;

// Error rates are clamped into `[ERR_EPS, 1 - ERR_EPS]`
// before the logarithm that yields alpha.
const ERR_EPS: f64 = 1e-12;


/// Defines `AdaBoost.OC`.
///
/// The algorithm keeps an error distribution over all
/// `(case, class)` pairs whose entries at each case's true class
/// are pinned to zero.
/// Every iteration searches for a binary coloring of the classes
/// that separates as much error weight as possible,
/// trains a single binary slot on the colored targets,
/// and re-weights the distribution by how strongly each pair
/// agrees with the slot's (sign-only) predictions.
///
/// # Example
///
/// ```no_run
/// use arcboost::prelude::*;
///
/// let sample = Sample::from_csv("train.csv", true, 5).unwrap();
/// let (_, n_input) = sample.shape();
///
/// let mut booster = AdaBoostOC::init(&sample)
///     .ensemble_size(50);
/// let builder = LogisticBuilder::new(n_input);
///
/// let f: OcClassifier<Logistic> = booster.run(&builder);
/// let predicted = f.class_predict(sample.input(0));
/// ```
pub struct AdaBoostOC<'a, L> {
    // Training sample
    sample: &'a Sample,

    // Requested number of members.
    n_models: usize,

    verbose: bool,

    // Partition search strategy.
    strategy: ColoringStrategy,

    // Seed for the randomized partition search.
    seed: u64,

    // True class of each case, computed once.
    tclass: Vec<usize>,

    // Error distribution over all (case, class) pairs, row-major.
    // Entries at (case, true class) stay zero for all of training.
    err_dist: Vec<f64>,

    // Per-member state of the trained ensemble.
    alpha: Vec<f64>,
    colorings: Vec<Coloring>,
    slots: Vec<L>,
}


impl<'a, L> AdaBoostOC<'a, L> {
    /// Initialize the `AdaBoostOC` builder.
    pub fn init(sample: &'a Sample) -> Self {
        Self {
            sample,
            n_models: DEFAULT_ENSEMBLE_SIZE,
            verbose: false,
            strategy: ColoringStrategy::Auto,
            seed: DEFAULT_SEED,
            tclass: Vec::new(),
            err_dist: Vec::new(),
            alpha: Vec::new(),
            colorings: Vec::new(),
            slots: Vec::new(),
        }
    }


    /// Set the requested number of ensemble members.
    /// Default value is `10`.
    pub fn ensemble_size(mut self, n_models: usize) -> Self {
        self.n_models = n_models;
        self
    }


    /// Set the partition search strategy.
    /// Default value is [`ColoringStrategy::Auto`].
    pub fn coloring_strategy(mut self, strategy: ColoringStrategy) -> Self {
        self.strategy = strategy;
        self
    }


    /// Set the seed of the randomized partition search.
    /// Unused by the exhaustive strategy.
    /// Default value is `1234`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Print a progress line per trained member.
    /// Default value is `false`.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// The weight matrix `w`:
    /// `w[a * C + b]` sums the error-distribution entries at
    /// `(case, a)` over all cases whose true class is `b`.
    /// It quantifies how much weight a coloring separates when it
    /// assigns `a` and `b` opposite colors.
    fn weight_matrix(&self) -> Vec<f64> {
        let n_class = self.sample.n_class();
        let n_sample = self.sample.shape().0;
        let tclass = &self.tclass;
        let err_dist = &self.err_dist;

        (0..n_class * n_class)
            .into_par_iter()
            .map(|ab| {
                let a = ab / n_class;
                let b = ab % n_class;
                (0..n_sample)
                    .filter(|&i| tclass[i] == b)
                    .map(|i| err_dist[i * n_class + a])
                    .sum::<f64>()
            })
            .collect()
    }


    /// Agreement count of one `(case, class)` pair:
    /// one point if the coloring of the case's true class disagrees
    /// with the binary prediction, another if the coloring of
    /// `class` matches it.
    fn agreement(
        coloring: &Coloring,
        tclass: usize,
        class: usize,
        h: f64,
    ) -> f64 {
        let mut k = 0.0;
        if coloring.color(tclass) != h {
            k += 1.0;
        }
        if coloring.color(class) == h {
            k += 1.0;
        }
        k
    }
}


impl<L> Booster<L> for AdaBoostOC<'_, L>
    where L: BaseLearner,
{
    type Output = OcClassifier<L>;

    fn preprocess<W>(&mut self, _builder: &W)
        where W: LearnerBuilder<Learner = L>
    {
        checker::check_sample(self.sample);
        checker::check_n_class(self.sample.n_class());

        let n_sample = self.sample.shape().0;
        let n_class = self.sample.n_class();

        self.tclass = (0..n_sample)
            .map(|i| self.sample.class_of(i))
            .collect();

        // Uniform over the erroneous (case, class) pairs,
        // zero at every true class.
        let uni = 1.0 / (n_sample * (n_class - 1)) as f64;
        self.err_dist = (0..n_sample * n_class)
            .map(|ic| {
                if ic % n_class == self.tclass[ic / n_class] { 0.0 } else { uni }
            })
            .collect();
        checker::check_distribution(&self.err_dist);

        self.alpha = Vec::new();
        self.colorings = Vec::new();
        self.slots = Vec::new();
    }


    fn boost<W>(&mut self, builder: &W, iteration: usize)
        -> ControlFlow<usize>
        where W: LearnerBuilder<Learner = L>
    {
        if iteration > self.n_models {
            return ControlFlow::Break(self.n_models);
        }

        let n_sample = self.sample.shape().0;
        let n_class = self.sample.n_class();

        // Find the coloring separating the most error weight.
        let w = self.weight_matrix();
        let crit = |coloring: &Coloring| {
            let mut sum = 0.0;
            for a in 0..n_class {
                for b in 0..n_class {
                    if coloring.splits(a, b) {
                        sum += w[a * n_class + b];
                    }
                }
            }
            sum
        };
        let (best, score) = match self.strategy.resolve(n_class) {
            ColoringStrategy::Randomized { n_candidates } => {
                // Vary the seed per member so the restarts differ.
                coloring::randomized_search(
                    n_class,
                    n_candidates,
                    self.seed.wrapping_add(iteration as u64),
                    crit,
                )
            }
            _ => coloring::exhaustive_search(n_class, crit),
        };

        // Per-case selection distribution: how much of each case's
        // error weight the chosen coloring separates from its
        // true class.
        let mut dist = (0..n_sample)
            .map(|i| {
                let icolor = best.color(self.tclass[i]);
                (0..n_class)
                    .filter(|&c| best.color(c) != icolor)
                    .map(|c| self.err_dist[i * n_class + c])
                    .sum::<f64>()
            })
            .collect::<Vec<_>>();
        utils::normalize(&mut dist);

        // One binary slot, trained toward the colored targets.
        let mut slot = builder.build();
        for i in 0..n_sample {
            slot.add_weighted_case(
                self.sample.input(i),
                best.color(self.tclass[i]),
                dist[i],
            );
        }
        slot.train();

        // Sign-only predictions on the training sample.
        let h = (0..n_sample)
            .map(|i| {
                if slot.predict(self.sample.input(i)) > 0.0 { 1.0 } else { -1.0 }
            })
            .collect::<Vec<_>>();

        // Weighted empirical error of the new member.
        let mut err = 0.0;
        for i in 0..n_sample {
            for class in 0..n_class {
                let k = Self::agreement(&best, self.tclass[i], class, h[i]);
                err += k * self.err_dist[i * n_class + class];
            }
        }
        err = (0.5 * err).clamp(ERR_EPS, 1.0 - ERR_EPS);

        let alpha = 0.5 * ((1.0 - err) / err).ln();

        // Re-weight the error distribution and rescale.
        for i in 0..n_sample {
            for class in 0..n_class {
                let k = Self::agreement(&best, self.tclass[i], class, h[i]);
                self.err_dist[i * n_class + class] *= (alpha * k).exp();
            }
        }
        utils::normalize(&mut self.err_dist);
        checker::check_distribution(&self.err_dist);

        self.alpha.push(alpha);
        self.colorings.push(best);
        self.slots.push(slot);

        if self.verbose {
            println!(
                "{} split score = {score:>10.6}, alpha = {alpha:>10.6}",
                format!("[member {iteration:>4}]").bold().green(),
            );
        }

        ControlFlow::Continue(())
    }


    fn postprocess<W>(&mut self, _builder: &W) -> Self::Output
        where W: LearnerBuilder<Learner = L>
    {
        OcClassifier {
            slots: mem::take(&mut self.slots),
            colorings: mem::take(&mut self.colorings),
            alpha: mem::take(&mut self.alpha),
            n_class: self.sample.n_class(),
        }
    }
}


/// A trained `AdaBoost.OC` ensemble.
pub struct OcClassifier<L> {
    slots: Vec<L>,
    colorings: Vec<Coloring>,
    alpha: Vec<f64>,
    n_class: usize,
}


impl<L> OcClassifier<L>
    where L: BaseLearner,
{
    /// Number of active members.
    pub fn n_members(&self) -> usize {
        self.alpha.len()
    }


    /// The step size of each active member.
    pub fn alphas(&self) -> &[f64] {
        &self.alpha
    }


    /// The coloring chosen for each active member.
    pub fn colorings(&self) -> &[Coloring] {
        &self.colorings
    }


    /// Per-class scores: every member adds its alpha to all
    /// classes whose color matches the sign of its prediction.
    pub fn scores(&self, input: &[f64]) -> Vec<f64> {
        let mut scores = vec![0.0; self.n_class];
        for ((slot, coloring), &alpha) in self.slots.iter()
            .zip(&self.colorings)
            .zip(&self.alpha)
        {
            let h = if slot.predict(input) > 0.0 { 1.0 } else { -1.0 };
            for (class, score) in scores.iter_mut().enumerate() {
                if coloring.color(class) == h {
                    *score += alpha;
                }
            }
        }
        scores
    }


    /// The class with the largest score,
    /// ties broken by the lowest class index.
    /// Returns `None` when no member was trained.
    pub fn class_predict(&self, input: &[f64]) -> Option<usize> {
        if self.alpha.is_empty() {
            return None;
        }
        Some(utils::argmax_first(&self.scores(input)))
    }
}
