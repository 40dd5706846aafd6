//! Confidence-rated multiclass boosting.

mod adaboost_mh_algorithm;

pub use adaboost_mh_algorithm::{
    AdaBoostMH,
    MhClassifier,
};
