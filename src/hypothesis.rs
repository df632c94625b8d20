//! The core library for `Hypothesis` traits.

pub(crate) mod hypothesis_traits;
pub(crate) mod prediction;


pub use hypothesis_traits::Regressor;
pub use prediction::{Prediction, PredictionResult};
