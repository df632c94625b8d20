//! Struct `Sample` represents an encoded batch of training rows.

// Provides raw and encoded feature values.
pub(crate) mod feature;
// Provides the categorical encoders.
pub(crate) mod encoder;
// Provides sample struct.
pub(crate) mod sample_struct;


pub use feature::{RawValue, FeatureValue, Row};
pub use encoder::{CategoricalEncoder, FeatureEncoding};
pub use sample_struct::Sample;
