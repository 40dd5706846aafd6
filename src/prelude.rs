//! Exports the standard ensemble builders and traits.
//!
pub use crate::booster::{
    // Booster trait
    Booster,


    // Bootstrap aggregation
    Bagging,
    BaggingClassifier,


    // Confidence-rated multiclass boosting
    AdaBoostMH,
    MhClassifier,


    // Output-coded multiclass boosting
    AdaBoostOC,
    OcClassifier,
    Coloring,
    ColoringStrategy,
};


pub use crate::base_learner::{
    // Base learner contract and slot factory
    BaseLearner,
    LearnerBuilder,


    // Kernel regression learner
    Grnn,
    GrnnBuilder,


    // Logistic regression learner
    Logistic,
    LogisticBuilder,
};


pub use crate::optimize::{
    LineSearch,
    BrentMinimizer,
};


pub use crate::sample::Sample;

pub use crate::research::CrossValidation;
