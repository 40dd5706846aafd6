//! Struct `Sample` represents a multiclass training sample.

// Provides sample struct.
pub(crate) mod sample_struct;

pub use sample_struct::Sample;
