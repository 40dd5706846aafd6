#![warn(missing_docs)]

//!
//! A crate that combines many instances of an arbitrary trainable model
//! into an ensemble for multiclass classification.
//!
//! Three resampling strategies are provided,
//! all operating on the same training sample and base learner
//! so that their behavior can be compared directly.
//!
//! - [`Bagging`]
//!     Trains independent one-vs-rest learner sets
//!     on bootstrap resamples of the training sample and
//!     aggregates them by averaging or voting.
//!
//! - [`AdaBoostMH`]
//!     Confidence-rated multiclass boosting.
//!     Maintains a joint distribution over (case, class) pairs and
//!     picks each step size by a one-dimensional line search.
//!
//! - [`AdaBoostOC`]
//!     Output-coded multiclass boosting.
//!     Reduces the multiclass problem to a sequence of binary ones
//!     by searching for a good binary coloring of the classes.
//!
//! The base learner is anything implementing [`BaseLearner`];
//! fresh learner instances are produced through [`LearnerBuilder`].
//! Two conforming learners are included:
//! a kernel regressor ([`Grnn`]) and a logistic model ([`Logistic`]).

pub mod sample;
pub mod base_learner;
pub mod optimize;
pub mod booster;
pub mod common;
pub mod research;

/// Exports the commonly used structs and traits.
pub mod prelude;

pub use sample::Sample;

pub use base_learner::{
    BaseLearner,
    LearnerBuilder,
    Grnn,
    GrnnBuilder,
    Logistic,
    LogisticBuilder,
};

pub use optimize::{
    LineSearch,
    BrentMinimizer,
};

pub use booster::{
    Booster,
    Bagging,
    BaggingClassifier,
    AdaBoostMH,
    MhClassifier,
    AdaBoostOC,
    OcClassifier,
    Coloring,
    ColoringStrategy,
};

pub use research::CrossValidation;
