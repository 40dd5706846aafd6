//! The files in `base_learner/` directory define
//! the `BaseLearner` contract and the learners shipped with this crate.

/// Provides the `BaseLearner` and `LearnerBuilder` traits.
pub mod core;

/// Defines the kernel regression learner.
pub mod grnn;

/// Defines the logistic regression learner.
pub mod logistic;

pub use self::core::{
    BaseLearner,
    LearnerBuilder,
};

pub use self::grnn::{
    Grnn,
    GrnnBuilder,
};

pub use self::logistic::{
    Logistic,
    LogisticBuilder,
};
