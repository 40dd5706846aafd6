//! Defines `Logistic`, a logistic regression learner.
use rand::prelude::*;
use rand_distr::{Normal, Distribution};

use crate::optimize::{BrentMinimizer, LineSearch};
use super::core::{BaseLearner, LearnerBuilder};


const DEFAULT_N_OUTER: usize = 10;
const DEFAULT_SEED: u64 = 1234;
const STD_SHRINK: f64 = 0.7;

// Interval searched for the intercept,
// with a steep penalty outside it.
const INTERCEPT_LIMIT: f64 = 20.0;

const MAX_EXP: f64 = 437.0;

// exp with the argument capped so that the likelihood
// stays finite for extreme log odds.
fn safe_exp(x: f64) -> f64 {
    x.min(MAX_EXP).exp()
}


/// Logistic regression trained by simulated annealing.
///
/// The slope coefficients are annealed;
/// for every candidate the intercept is solved exactly by
/// a one-dimensional line search maximizing the
/// importance-weighted log likelihood.
/// Slower than gradient ascent but robust on
/// separable or ill-conditioned training sets.
///
/// `predict` returns the raw log odds ratio,
/// so the output is unbounded;
/// the ensemble layer clips it where needed.
pub struct Logistic {
    n_input: usize,
    n_outer: usize,
    n_inner: usize,
    seed: u64,

    cases: Vec<WeightedCase>,
    // Slopes first, intercept last.
    coefs: Vec<f64>,

    optimizer: BrentMinimizer,
}


struct WeightedCase {
    input: Vec<f64>,
    target: f64,
    importance: f64,
}


impl Logistic {
    /// Importance-weighted Bernoulli log likelihood of
    /// the given slopes and intercept.
    fn log_likelihood(&self, slopes: &[f64], intercept: f64) -> f64 {
        let mut sum = 0.0;
        for case in &self.cases {
            let term = intercept
                + slopes.iter()
                    .zip(&case.input)
                    .map(|(c, x)| c * x)
                    .sum::<f64>();
            // Targets are in {-1, +1}; the likelihood wants {0, 1}.
            let y = 0.5 * (case.target + 1.0);
            sum += case.importance
                * (term * y - (1.0 + safe_exp(term)).ln());
        }
        sum
    }


    /// Best intercept for the given slopes,
    /// as the pair `(intercept, log likelihood)`.
    fn solve_intercept(&self, slopes: &[f64]) -> (f64, f64) {
        let objective = |t: f64| {
            let penalty = if t.abs() > INTERCEPT_LIMIT {
                1e10 * (t.abs() - INTERCEPT_LIMIT)
            } else {
                0.0
            };
            penalty - self.log_likelihood(slopes, t)
        };

        let (t, y) = self.optimizer.minimize(
            (-INTERCEPT_LIMIT, INTERCEPT_LIMIT),
            &objective,
        );
        (t, -y)
    }
}


impl BaseLearner for Logistic {
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


    fn train(&mut self) {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let normal = Normal::new(0.0, 1.0).unwrap();

        let mut center = vec![0.0; self.n_input];
        let mut best_wts = vec![0.0; self.n_input];
        let mut test_wts = vec![0.0; self.n_input];
        let mut best_y = f64::NEG_INFINITY;
        let mut std = 1.0;

        for _ in 0..self.n_outer {
            for _ in 0..self.n_inner {
                for (w, c) in test_wts.iter_mut().zip(&center) {
                    *w = c + std * normal.sample(&mut rng);
                }

                let (_, y) = self.solve_intercept(&test_wts);
                if y > best_y {
                    best_y = y;
                    best_wts.copy_from_slice(&test_wts);
                }
            }
            center.copy_from_slice(&best_wts);
            std *= STD_SHRINK;
        }

        let (intercept, _) = self.solve_intercept(&best_wts);
        self.coefs[..self.n_input].copy_from_slice(&best_wts);
        self.coefs[self.n_input] = intercept;
    }


    fn predict(&self, input: &[f64]) -> f64 {
        self.coefs[self.n_input]
            + self.coefs[..self.n_input].iter()
                .zip(input)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}


/// A builder producing [`Logistic`] instances,
/// usable directly as the slot factory of an ensemble.
pub struct LogisticBuilder {
    n_input: usize,
    n_outer: usize,
    n_inner: usize,
    seed: u64,
}


impl LogisticBuilder {
    /// Construct a new builder for learners of
    /// the given input dimension.
    pub fn new(n_input: usize) -> Self {
        Self {
            n_input,
            n_outer: DEFAULT_N_OUTER,
            // More inputs need more candidates per pass.
            n_inner: 10 + 5 * n_input * n_input,
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
    /// Default value is `10 + 5 * n_input^2`.
    pub fn n_inner(mut self, n_inner: usize) -> Self {
        self.n_inner = n_inner;
        self
    }


    /// Set the seed of the annealing randomness.
    /// Default value is `1234`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}


impl LearnerBuilder for LogisticBuilder {
    type Learner = Logistic;

    fn build(&self) -> Logistic {
        Logistic {
            n_input: self.n_input,
            n_outer: self.n_outer,
            n_inner: self.n_inner,
            seed: self.seed,
            cases: Vec::new(),
            coefs: vec![0.0; self.n_input + 1],
            optimizer: BrentMinimizer::new()
                .max_iter(50)
                .tolerance(1e-10),
        }
    }
}
