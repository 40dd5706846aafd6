use rand::prelude::*;
use colored::Colorize;
use crate::Sample;

use std::iter::Iterator;

const WIDTH: usize = 9;

/// A struct that generates class-stratified train/test pairs
/// for cross validation,
/// so that the three ensemble builders can be compared
/// on held-out data.
///
/// Cases are grouped by their true class and dealt round-robin
/// over the folds.
/// Every class with at least `n_folds` cases therefore occurs in
/// every test sample, and every class with two or more cases
/// occurs in every training sample;
/// a plain slice of the case order guarantees neither.
/// # Example
/// ```no_run
/// use arcboost::prelude::*;
///
/// let sample = Sample::from_csv("data.csv", true, 3).unwrap();
/// let (_, n_input) = sample.shape();
///
/// let cv = CrossValidation::new(&sample)
///     .n_folds(5)
///     .verbose(true)
///     .seed(777)
///     .shuffle();
/// for (train, test) in cv {
///     let mut booster = Bagging::init(&train)
///         .ensemble_size(30);
///     let builder = GrnnBuilder::new(n_input);
///     let f = booster.run(&builder);
///
///     let n_test = test.shape().0;
///     let errors = (0..n_test)
///         .filter(|&i| f.class_predict(test.input(i)) != Some(test.class_of(i)))
///         .count();
///     println!("[test error: {}]", errors as f64 / n_test as f64);
/// }
/// ```
pub struct CrossValidation<'a> {
    current_fold: usize,
    n_folds: usize,
    seed: u64,
    sample: &'a Sample,
    // Case indices grouped by true class, in dealing order.
    by_class: Vec<Vec<usize>>,
    verbose: bool,
}


impl<'a> CrossValidation<'a> {
    /// Construct a new instance of `CrossValidation.`
    #[inline]
    pub fn new(sample: &'a Sample) -> Self {
        let n_sample = sample.shape().0;
        let mut by_class = vec![Vec::new(); sample.n_class()];
        for i in 0..n_sample {
            by_class[sample.class_of(i)].push(i);
        }
        Self {
            current_fold: 0,
            n_folds: 5,
            seed: 1234,
            verbose: false,
            sample,
            by_class,
        }
    }


    /// Set the number of folds.
    /// Default value is `5.`
    #[inline]
    pub fn n_folds(mut self, n_folds: usize) -> Self {
        assert!(n_folds >= 2, "cross validation needs at least two folds");
        self.n_folds = n_folds;
        self
    }


    /// Set the seed of the randomness for shuffling.
    /// Default vaule is `1234.`
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Set the verbose parameter.
    /// If `true`, `CrossValidation` prints some information
    /// when generating a train/test pair.
    /// Default vaule is `false.`
    #[inline]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Shuffle the cases within each class group before dealing.
    /// By default, `CrossValidation` deals them in sample order.
    /// Shuffling never moves a case to another class group,
    /// so the stratification is unaffected.
    #[inline]
    pub fn shuffle(mut self) -> Self {
        let mut rng = StdRng::seed_from_u64(self.seed);
        for group in self.by_class.iter_mut() {
            group.shuffle(&mut rng);
        }
        self
    }


    /// Returns the training/test sample for the `fold`-th fold.
    /// Within each class group, every `n_folds`-th case
    /// starting at position `fold` lands on the test side.
    #[inline]
    fn fold_at(&self, fold: usize) -> (Sample, Sample) {
        let mut train_ix = Vec::new();
        let mut test_ix = Vec::new();
        for group in &self.by_class {
            for (pos, &i) in group.iter().enumerate() {
                if pos % self.n_folds == fold {
                    test_ix.push(i);
                } else {
                    train_ix.push(i);
                }
            }
        }

        let start = train_ix.len();
        train_ix.extend_from_slice(&test_ix);
        let end = train_ix.len();
        self.sample.split(&train_ix, start, end)
    }
}


impl<'a> Iterator for CrossValidation<'a> {
    type Item = (Sample, Sample);
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_fold >= self.n_folds { return None; }

        let output = self.fold_at(self.current_fold);
        self.current_fold += 1;

        if self.verbose {
            let train_size = output.0.shape().0;
            let test_size = output.1.shape().0;
            println!(
                "{}    {}    {}",
                format!("  [{: >3}'th fold]", self.current_fold).bold().red(),
                format!("[TRAIN {:>WIDTH$}]", train_size).bold().green(),
                format!("[TEST {:>WIDTH$}]", test_size).bold().yellow(),
            );
        }

        Some(output)
    }
}
