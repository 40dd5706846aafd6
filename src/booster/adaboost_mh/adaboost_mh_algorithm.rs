//! Provides [`AdaBoostMH`](AdaBoostMH),
//! the confidence-rated multiclass variant of AdaBoost
//! by Schapire & Singer, 1999.
use colored::Colorize;
use rayon::prelude::*;

use crate::{
    Sample,
    Booster,

    base_learner::{BaseLearner, LearnerBuilder},
    optimize::{BrentMinimizer, LineSearch},
    common::{utils, checker},
};

use std::mem;
use std::ops::ControlFlow;


const DEFAULT_ENSEMBLE_SIZE: usize = 10;


/// Defines `AdaBoost.MH`.
///
/// The algorithm keeps a joint probability distribution over all
/// `(case, class)` pairs.
/// Every iteration trains one learner slot per class on the full
/// training sample, each case weighted by the current distribution
/// entry of its `(case, class)` pair,
/// then picks a step size `alpha` by minimizing
/// `sum dist * exp(-alpha * u)` over `[-1, 1]`,
/// where `u` is the clipped margin of the freshly trained member.
///
/// Two degenerate outcomes terminate construction early and are
/// not failures:
/// a member with no negative margin is kept with the heuristic
/// step size `0.5 * ln(n_sample)`,
/// and a member with no positive margin is discarded.
/// Either way the ensemble freezes at the members trained so far,
/// and prediction uses that count.
///
/// # Example
///
/// ```no_run
/// use arcboost::prelude::*;
///
/// let sample = Sample::from_csv("train.csv", true, 3).unwrap();
/// let (_, n_input) = sample.shape();
///
/// let mut booster = AdaBoostMH::init(&sample)
///     .ensemble_size(20);
/// let builder = GrnnBuilder::new(n_input);
///
/// let f: MhClassifier<Grnn> = booster.run(&builder);
/// let predicted = f.class_predict(sample.input(0));
/// ```
pub struct AdaBoostMH<'a, L> {
    // Training sample
    sample: &'a Sample,

    // Requested number of members.
    n_models: usize,

    verbose: bool,

    // Step-size optimizer.
    optimizer: Box<dyn LineSearch>,

    // Distribution over all (case, class) pairs, row-major.
    dist: Vec<f64>,

    // Margin of the current member at each (case, class) pair.
    u: Vec<f64>,

    // Step size of each trained member.
    alpha: Vec<f64>,

    // Trained slots, `n_class` per member, flattened.
    slots: Vec<L>,
}


impl<'a, L> AdaBoostMH<'a, L> {
    /// Initialize the `AdaBoostMH` builder.
    pub fn init(sample: &'a Sample) -> Self {
        Self {
            sample,
            n_models: DEFAULT_ENSEMBLE_SIZE,
            verbose: false,
            optimizer: Box::new(BrentMinimizer::new()),
            dist: Vec::new(),
            u: Vec::new(),
            alpha: Vec::new(),
            slots: Vec::new(),
        }
    }


    /// Set the requested number of ensemble members.
    /// Training may stop earlier on a degenerate member.
    /// Default value is `10`.
    pub fn ensemble_size(mut self, n_models: usize) -> Self {
        self.n_models = n_models;
        self
    }


    /// Replace the step-size optimizer.
    /// Any deterministic [`LineSearch`] implementation works;
    /// the default is [`BrentMinimizer`] with its default settings.
    pub fn optimizer(mut self, optimizer: Box<dyn LineSearch>) -> Self {
        self.optimizer = optimizer;
        self
    }


    /// Print a progress line per trained member.
    /// Default value is `false`.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}


impl<L> Booster<L> for AdaBoostMH<'_, L>
    where L: BaseLearner + Send,
{
    type Output = MhClassifier<L>;

    fn preprocess<W>(&mut self, _builder: &W)
        where W: LearnerBuilder<Learner = L>
    {
        checker::check_sample(self.sample);
        checker::check_n_class(self.sample.n_class());

        let n_pair = self.sample.shape().0 * self.sample.n_class();
        let uni = 1.0 / n_pair as f64;
        self.dist = vec![uni; n_pair];
        self.u = vec![0.0; n_pair];

        self.alpha = Vec::new();
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

        // Train one slot per class,
        // every case weighted by its (case, class) distribution entry.
        let mut slots = (0..n_class)
            .map(|_| builder.build())
            .collect::<Vec<_>>();
        for (class, slot) in slots.iter_mut().enumerate() {
            for i in 0..n_sample {
                slot.add_weighted_case(
                    self.sample.input(i),
                    self.sample.label(i)[class],
                    self.dist[i * n_class + class],
                );
            }
        }
        slots.par_iter_mut()
            .for_each(|slot| slot.train());

        // Margins of the new member.
        // A positive margin means the slot got the sign right.
        let mut n_good = 0_usize;
        let mut n_bad = 0_usize;
        for i in 0..n_sample {
            let input = self.sample.input(i);
            let label = self.sample.label(i);
            for (class, slot) in slots.iter().enumerate() {
                let h = utils::clip(slot.predict(input));
                let u = h * label[class];
                self.u[i * n_class + class] = u;
                if u > 0.0 {
                    n_good += 1;
                }
                if u < 0.0 {
                    n_bad += 1;
                }
            }
        }

        // A member that never fails gets a heuristic big step size
        // and closes the ensemble; no further member can improve on it.
        if n_bad == 0 {
            self.alpha.push(0.5 * (n_sample as f64).ln());
            self.slots.extend(slots);
            if self.verbose {
                println!(
                    "{} perfect member, freezing ensemble",
                    format!("[member {iteration:>4}]").bold().yellow(),
                );
            }
            return ControlFlow::Break(iteration);
        }

        // A member that is never right is worthless; drop it and stop.
        if n_good == 0 {
            if self.verbose {
                println!(
                    "{} uninformative member discarded, stopping",
                    format!("[member {iteration:>4}]").bold().red(),
                );
            }
            return ControlFlow::Break(iteration);
        }

        // Optimal step size over [-1, 1].
        let dist = &self.dist;
        let u = &self.u;
        let objective = move |alpha: f64| {
            utils::weighted_exp_sum(alpha, dist, u)
        };
        let (alpha, _) = self.optimizer.minimize((-1.0, 1.0), &objective);

        // Re-weight and rescale to keep a probability distribution.
        self.dist.par_iter_mut()
            .zip(&self.u)
            .for_each(|(d, ui)| *d *= (-alpha * ui).exp());
        utils::normalize(&mut self.dist);
        checker::check_distribution(&self.dist);

        self.alpha.push(alpha);
        self.slots.extend(slots);

        if self.verbose {
            println!(
                "{} alpha = {alpha:>10.6}",
                format!("[member {iteration:>4}]").bold().green(),
            );
        }

        ControlFlow::Continue(())
    }


    fn postprocess<W>(&mut self, _builder: &W) -> Self::Output
        where W: LearnerBuilder<Learner = L>
    {
        MhClassifier {
            slots: mem::take(&mut self.slots),
            alpha: mem::take(&mut self.alpha),
            n_class: self.sample.n_class(),
        }
    }
}


/// A trained `AdaBoost.MH` ensemble.
pub struct MhClassifier<L> {
    slots: Vec<L>,
    alpha: Vec<f64>,
    n_class: usize,
}


impl<L> MhClassifier<L>
    where L: BaseLearner,
{
    /// Number of active members.
    /// May be smaller than the requested ensemble size
    /// when training terminated early.
    pub fn n_members(&self) -> usize {
        self.alpha.len()
    }


    /// The step size of each active member.
    pub fn alphas(&self) -> &[f64] {
        &self.alpha
    }


    /// Alpha-weighted sum of the clipped slot outputs per class.
    pub fn scores(&self, input: &[f64]) -> Vec<f64> {
        let mut scores = vec![0.0; self.n_class];
        for (member, &alpha) in self.alpha.iter().enumerate() {
            let slots = &self.slots[member * self.n_class..];
            for (score, slot) in scores.iter_mut().zip(slots) {
                *score += alpha * utils::clip(slot.predict(input));
            }
        }
        scores
    }


    /// The class with the largest weighted score,
    /// ties broken by the lowest class index.
    /// Returns `None` when no member survived training.
    pub fn class_predict(&self, input: &[f64]) -> Option<usize> {
        if self.alpha.is_empty() {
            return None;
        }
        Some(utils::argmax_first(&self.scores(input)))
    }
}
