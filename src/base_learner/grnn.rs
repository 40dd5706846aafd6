//! Defines `Grnn`, a general regression (kernel) learner.
use rand::prelude::*;
use rand_distr::{Normal, Distribution};

use super::core::{BaseLearner, LearnerBuilder};


// Floor on kernel values so that a case far from
// every stored case still yields a finite density.
const KERNEL_FLOOR: f64 = 1e-180;

const DEFAULT_N_OUTER: usize = 10;
const DEFAULT_N_INNER: usize = 100;
const DEFAULT_START_STD: f64 = 3.0;
const DEFAULT_SEED: u64 = 1234;
const STD_SHRINK: f64 = 0.7;


/// A general regression neural network:
/// Gaussian-kernel regression over the stored training cases
/// with one bandwidth per input variable.
///
/// Training anneals the log-bandwidths,
/// scoring each candidate by leave-one-out mean squared error.
/// Case importances scale the kernel weights,
/// so the ensemble builders can hand over their distributions directly.
pub struct Grnn {
    n_input: usize,
    n_outer: usize,
    n_inner: usize,
    start_std: f64,
    seed: u64,

    cases: Vec<WeightedCase>,
    sigma: Vec<f64>,
}


struct WeightedCase {
    input: Vec<f64>,
    target: f64,
    importance: f64,
}


impl Grnn {
    /// Gaussian kernel between `input` and the stored case `case`,
    /// scaled by the case importance.
    fn kernel(&self, input: &[f64], case: &WeightedCase) -> f64 {
        let dist = input.iter()
            .zip(&case.input)
            .zip(&self.sigma)
            .map(|((x, c), s)| {
                let diff = (x - c) / s;
                diff * diff
            })
            .sum::<f64>();

        case.importance * (-dist).exp().max(KERNEL_FLOOR)
    }


    /// Leave-one-out mean squared error under the current bandwidths.
    fn loo_error(&self) -> f64 {
        let n = self.cases.len();
        let mut err = 0.0;

        for (itest, test) in self.cases.iter().enumerate() {
            let mut numer = 0.0;
            let mut denom = 0.0;
            for (icase, case) in self.cases.iter().enumerate() {
                if icase == itest {
                    continue;
                }
                let k = self.kernel(&test.input, case);
                numer += k * case.target;
                denom += k;
            }
            // Zero-importance neighbors can leave an empty kernel sum.
            let predicted = if denom > 0.0 { numer / denom } else { 0.0 };
            let diff = predicted - test.target;
            err += diff * diff;
        }

        err / n as f64
    }
}


impl BaseLearner for Grnn {
    fn reset(&mut self) {
        self.cases.clear();
    }


    fn add_weighted_case(&mut self, input: &[f64], target: f64, importance: f64) {
        assert_eq!(input.len(), self.n_input);
        assert!(importance >= 0.0);
        self.cases.push(WeightedCase {
            input: input.to_vec(),
            target,
            importance,
        });
    }


    /// Anneal the log-bandwidths:
    /// perturb around the current center, keep the best candidate,
    /// re-center and shrink the perturbation after each outer pass.
    fn train(&mut self) {
        self.sigma = vec![1.0; self.n_input];
        if self.cases.len() < 2 {
            return;
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let normal = Normal::new(0.0, 1.0).unwrap();

        let mut center = vec![0.0; self.n_input];
        let mut best_wts = vec![0.0; self.n_input];
        let mut test_wts = vec![0.0; self.n_input];
        let mut best_error = f64::INFINITY;
        let mut std = self.start_std;

        for _ in 0..self.n_outer {
            for _ in 0..self.n_inner {
                for (w, c) in test_wts.iter_mut().zip(&center) {
                    *w = c + std * normal.sample(&mut rng);
                }
                for (s, w) in self.sigma.iter_mut().zip(&test_wts) {
                    *s = w.exp();
                }

                let error = self.loo_error();
                if error < best_error {
                    best_error = error;
                    best_wts.copy_from_slice(&test_wts);
                }
            }
            center.copy_from_slice(&best_wts);
            std *= STD_SHRINK;
        }

        for (s, w) in self.sigma.iter_mut().zip(&best_wts) {
            *s = w.exp();
        }
    }


    fn predict(&self, input: &[f64]) -> f64 {
        if self.cases.is_empty() {
            return 0.0;
        }

        let mut numer = 0.0;
        let mut denom = 0.0;
        for case in &self.cases {
            let k = self.kernel(input, case);
            numer += k * case.target;
            denom += k;
        }

        if denom > 0.0 { numer / denom } else { 0.0 }
    }
}


/// A builder producing [`Grnn`] instances,
/// usable directly as the slot factory of an ensemble.
pub struct GrnnBuilder {
    n_input: usize,
    n_outer: usize,
    n_inner: usize,
    start_std: f64,
    seed: u64,
}


impl GrnnBuilder {
    /// Construct a new builder for learners of
    /// the given input dimension.
    pub fn new(n_input: usize) -> Self {
        Self {
            n_input,
            n_outer: DEFAULT_N_OUTER,
            n_inner: DEFAULT_N_INNER,
            start_std: DEFAULT_START_STD,
            seed: DEFAULT_SEED,
        }
    }


    /// Set the number of outer annealing passes.
    /// Default value is `10`.
    pub fn n_outer(mut self, n_outer: usize) -> Self {
        self.n_outer = n_outer;
        self
    }


    /// Set the number of candidates per annealing pass.
    /// Default value is `100`.
    pub fn n_inner(mut self, n_inner: usize) -> Self {
        self.n_inner = n_inner;
        self
    }


    /// Set the starting standard deviation of
    /// the log-bandwidth perturbations.
    /// Default value is `3.0`.
    pub fn start_std(mut self, start_std: f64) -> Self {
        assert!(start_std > 0.0);
        self.start_std = start_std;
        self
    }


    /// Set the seed of the annealing randomness.
    /// Default value is `1234`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}


impl LearnerBuilder for GrnnBuilder {
    type Learner = Grnn;

    fn build(&self) -> Grnn {
        Grnn {
            n_input: self.n_input,
            n_outer: self.n_outer,
            n_inner: self.n_inner,
            start_std: self.start_std,
            seed: self.seed,
            cases: Vec::new(),
            sigma: vec![1.0; self.n_input],
        }
    }
}
