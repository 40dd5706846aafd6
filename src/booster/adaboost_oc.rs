//! Output-coded multiclass boosting.

mod adaboost_oc_algorithm;

/// Binary class colorings and the partition search.
pub mod coloring;

pub use adaboost_oc_algorithm::{
    AdaBoostOC,
    OcClassifier,
};

pub use coloring::{
    Coloring,
    ColoringStrategy,
};
