//! The files in `booster/` directory define
//! the `Booster` trait and the three ensemble builders.

/// Provides the `Booster` trait.
pub mod core;

/// Defines bootstrap aggregation.
pub mod bagging;

/// Defines confidence-rated multiclass boosting.
pub mod adaboost_mh;

/// Defines output-coded multiclass boosting.
pub mod adaboost_oc;


pub use self::core::Booster;

pub use self::bagging::{
    Bagging,
    BaggingClassifier,
};

pub use self::adaboost_mh::{
    AdaBoostMH,
    MhClassifier,
};

pub use self::adaboost_oc::{
    AdaBoostOC,
    OcClassifier,
    Coloring,
    ColoringStrategy,
};
