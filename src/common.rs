//! Defines some common functions used in this library.

/// Defines some useful functions such as clipping and normalization.
pub mod utils;

/// Defines some checker functions.
pub(crate) mod checker;
