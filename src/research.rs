//! Tools for comparing the resampling strategies experimentally.

/// Provides train/test fold generation.
pub mod cross_validation;

pub use cross_validation::CrossValidation;
