//! One-dimensional minimization used to pick boosting step sizes.

/// Provides the `LineSearch` trait.
pub mod core;

/// Defines the default bracket-and-refine minimizer.
pub mod brent;

pub use self::core::LineSearch;
pub use self::brent::BrentMinimizer;
