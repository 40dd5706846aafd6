#![allow(dead_code)]
//! Deterministic mock learners and synthetic data shared by
//! the integration tests.
use arcboost::prelude::*;
use rand::prelude::*;
use rand_distr::{Normal, Distribution};


/// Replays the stored training targets:
/// `predict` returns the target of the nearest stored case
/// (ties go to the case stored first).
/// With `negate`, it returns the opposite sign instead,
/// which makes the learner wrong on every case it was trained on.
pub struct ReplayLearner {
    cases: Vec<(Vec<f64>, f64)>,
    negate: bool,
}


/// Factory for [`ReplayLearner`] slots.
pub struct ReplayBuilder {
    negate: bool,
}


impl ReplayBuilder {
    /// Produces learners that reproduce their training targets.
    pub fn oracle() -> Self {
        Self { negate: false }
    }

    /// Produces learners that contradict their training targets.
    pub fn adversary() -> Self {
        Self { negate: true }
    }
}


impl LearnerBuilder for ReplayBuilder {
    type Learner = ReplayLearner;

    fn build(&self) -> ReplayLearner {
        ReplayLearner { cases: Vec::new(), negate: self.negate }
    }
}


impl BaseLearner for ReplayLearner {
    fn reset(&mut self) {
        self.cases.clear();
    }

    fn add_weighted_case(&mut self, input: &[f64], target: f64, _importance: f64) {
        self.cases.push((input.to_vec(), target));
    }

    fn train(&mut self) {}

    fn predict(&self, input: &[f64]) -> f64 {
        let mut best = f64::INFINITY;
        let mut out = 0.0;
        for (x, t) in &self.cases {
            let d = x.iter()
                .zip(input)
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f64>();
            if d < best {
                best = d;
                out = *t;
            }
        }
        if self.negate { -out } else { out }
    }
}


/// Ignores its training data entirely and predicts the sign of
/// one input coordinate. Useful for exercising the line-search
/// path of the boosters with a partly right, partly wrong member.
pub struct StumpLearner {
    coord: usize,
}


/// Factory for [`StumpLearner`] slots on a fixed coordinate.
pub struct StumpBuilder {
    pub coord: usize,
}


impl LearnerBuilder for StumpBuilder {
    type Learner = StumpLearner;

    fn build(&self) -> StumpLearner {
        StumpLearner { coord: self.coord }
    }
}


impl BaseLearner for StumpLearner {
    fn reset(&mut self) {}

    fn add_weighted_case(&mut self, _input: &[f64], _target: f64, _importance: f64) {}

    fn train(&mut self) {}

    fn predict(&self, input: &[f64]) -> f64 {
        if input[self.coord] > 0.0 { 1.0 } else { -1.0 }
    }
}


/// The four-case, two-class sample with alternating labels.
pub fn alternating_sample() -> Sample {
    Sample::from_rows(
        vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 1.0],
        ],
        vec![
            vec![1.0, -1.0],
            vec![-1.0, 1.0],
            vec![1.0, -1.0],
            vec![-1.0, 1.0],
        ],
    )
}


/// Well-separated bivariate Gaussian clusters, one per class,
/// with a fixed class rotation so that every class occurs.
pub fn gaussian_clusters(
    n_sample: usize,
    n_class: usize,
    separation: f64,
    seed: u64,
) -> Sample {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();

    let mut inputs = Vec::with_capacity(n_sample);
    let mut labels = Vec::with_capacity(n_sample);
    for i in 0..n_sample {
        let k = i % n_class;
        let x0 = k as f64 * separation + normal.sample(&mut rng);
        let x1 = -(k as f64) * separation + normal.sample(&mut rng);
        inputs.push(vec![x0, x1]);
        labels.push(
            (0..n_class)
                .map(|c| if c == k { 1.0 } else { -1.0 })
                .collect(),
        );
    }

    Sample::from_rows(inputs, labels)
}
