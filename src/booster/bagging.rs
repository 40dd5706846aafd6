//! Bootstrap aggregation over one-vs-rest learner sets.

mod bagging_algorithm;

pub use bagging_algorithm::{
    Bagging,
    BaggingClassifier,
};
