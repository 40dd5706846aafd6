//! Provides bootstrap aggregation ("bagging") by Breiman, 1996.
use colored::Colorize;
use rand::prelude::*;
use rayon::prelude::*;

use crate::{
    Sample,
    Booster,

    base_learner::{BaseLearner, LearnerBuilder},
    common::{utils, checker},
};

use std::mem;
use std::ops::ControlFlow;


const DEFAULT_ENSEMBLE_SIZE: usize = 10;
const DEFAULT_SEED: u64 = 1234;


/// Defines the bagging ensemble builder.
///
/// Each replicate draws a bootstrap sample of the training set
/// (same size, uniformly with replacement) and trains one learner
/// slot per class on it, labeled one-vs-rest.
/// Replicates are mutually independent;
/// the resampling is driven by a fixed seed,
/// so two runs with the same seed produce identical ensembles
/// for a deterministic base learner.
///
/// # Example
///
/// ```no_run
/// use arcboost::prelude::*;
///
/// let sample = Sample::from_csv("train.csv", true, 3).unwrap();
/// let (_, n_input) = sample.shape();
///
/// let mut booster = Bagging::init(&sample)
///     .ensemble_size(30)
///     .seed(42);
/// let builder = GrnnBuilder::new(n_input);
///
/// let f: BaggingClassifier<Grnn> = booster.run(&builder);
/// let predicted = f.class_predict(sample.input(0));
/// ```
pub struct Bagging<'a, L> {
    // Training sample
    sample: &'a Sample,

    // Number of bootstrap replicates to train.
    n_replicates: usize,

    // Seed for the bootstrap resampling.
    seed: u64,

    verbose: bool,

    // Resampling source, re-seeded in `preprocess`.
    rng: StdRng,

    // Trained slots, `n_replicates * n_class` once construction ends.
    slots: Vec<L>,
}


impl<'a, L> Bagging<'a, L> {
    /// Initialize the `Bagging` builder.
    pub fn init(sample: &'a Sample) -> Self {
        Self {
            sample,
            n_replicates: DEFAULT_ENSEMBLE_SIZE,
            seed: DEFAULT_SEED,
            verbose: false,
            rng: StdRng::seed_from_u64(DEFAULT_SEED),
            slots: Vec::new(),
        }
    }


    /// Set the number of bootstrap replicates.
    /// Default value is `10`.
    pub fn ensemble_size(mut self, n_replicates: usize) -> Self {
        self.n_replicates = n_replicates;
        self
    }


    /// Set the seed of the bootstrap resampling.
    /// Default value is `1234`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Print a progress line per trained replicate.
    /// Default value is `false`.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}


impl<L> Booster<L> for Bagging<'_, L>
    where L: BaseLearner + Send,
{
    type Output = BaggingClassifier<L>;

    fn preprocess<W>(&mut self, _builder: &W)
        where W: LearnerBuilder<Learner = L>
    {
        checker::check_sample(self.sample);
        checker::check_n_class(self.sample.n_class());

        self.rng = StdRng::seed_from_u64(self.seed);
        self.slots = Vec::with_capacity(
            self.n_replicates * self.sample.n_class()
        );
    }


    fn boost<W>(&mut self, builder: &W, iteration: usize)
        -> ControlFlow<usize>
        where W: LearnerBuilder<Learner = L>
    {
        if iteration > self.n_replicates {
            return ControlFlow::Break(self.n_replicates);
        }

        let n_sample = self.sample.shape().0;
        let n_class = self.sample.n_class();

        // One bootstrap sample shared by the per-class slots.
        let drawn = (0..n_sample)
            .map(|_| self.rng.gen_range(0..n_sample))
            .collect::<Vec<_>>();

        let mut slots = (0..n_class)
            .map(|_| builder.build())
            .collect::<Vec<_>>();
        for (class, slot) in slots.iter_mut().enumerate() {
            for &k in &drawn {
                slot.add_case(self.sample.input(k), self.sample.label(k)[class]);
            }
        }

        // The slots of one replicate are independent of each other.
        slots.par_iter_mut()
            .for_each(|slot| slot.train());

        self.slots.extend(slots);

        if self.verbose {
            println!(
                "{} trained {n_class} one-vs-rest slots",
                format!("[replicate {iteration:>4}]").bold().green(),
            );
        }

        ControlFlow::Continue(())
    }


    fn postprocess<W>(&mut self, _builder: &W) -> Self::Output
        where W: LearnerBuilder<Learner = L>
    {
        BaggingClassifier {
            slots: mem::take(&mut self.slots),
            n_class: self.sample.n_class(),
        }
    }
}


/// A trained bagging ensemble.
///
/// Offers two prediction modes:
/// [`numeric_predict`](BaggingClassifier::numeric_predict) averages
/// the clipped per-class outputs over all replicates,
/// [`class_predict`](BaggingClassifier::class_predict) lets every
/// replicate vote for its best class and returns the majority.
pub struct BaggingClassifier<L> {
    slots: Vec<L>,
    n_class: usize,
}


impl<L> BaggingClassifier<L>
    where L: BaseLearner,
{
    /// Number of trained replicates.
    pub fn n_replicates(&self) -> usize {
        self.slots.len() / self.n_class
    }


    /// Number of classes.
    pub fn n_class(&self) -> usize {
        self.n_class
    }


    /// Per-class average of the clipped replicate outputs.
    /// Every entry of the returned vector lies in `[-1, 1]`.
    /// With zero trained replicates all entries are `0`.
    pub fn numeric_predict(&self, input: &[f64]) -> Vec<f64> {
        let n_replicates = self.n_replicates();
        let mut output = vec![0.0; self.n_class];
        if n_replicates == 0 {
            return output;
        }

        for replicate in self.slots.chunks_exact(self.n_class) {
            for (out, slot) in output.iter_mut().zip(replicate) {
                *out += utils::clip(slot.predict(input));
            }
        }

        output.iter_mut()
            .for_each(|out| *out /= n_replicates as f64);
        output
    }


    /// Per-class vote counts.
    /// Each replicate votes for the class whose slot produced
    /// the largest raw output, ties broken by the lowest class index.
    /// The counts always sum to the number of trained replicates.
    pub fn votes(&self, input: &[f64]) -> Vec<usize> {
        let mut count = vec![0_usize; self.n_class];

        for replicate in self.slots.chunks_exact(self.n_class) {
            let outputs = replicate.iter()
                .map(|slot| slot.predict(input))
                .collect::<Vec<_>>();
            count[utils::argmax_first(&outputs)] += 1;
        }

        count
    }


    /// The majority-voted class for `input`,
    /// ties broken by the lowest class index.
    /// Returns `None` when no replicate was trained.
    pub fn class_predict(&self, input: &[f64]) -> Option<usize> {
        if self.slots.is_empty() {
            return None;
        }

        let count = self.votes(input);
        let count = count.into_iter()
            .map(|c| c as f64)
            .collect::<Vec<_>>();
        Some(utils::argmax_first(&count))
    }
}
