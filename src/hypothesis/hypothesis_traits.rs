use rayon::prelude::*;

use crate::{FeatureValue, Sample};


/// A trait that defines the behavor of regressor.
/// You only need to implement `predict` method.
pub trait Regressor {
    /// Predicts the target value of an encoded feature vector.
    fn predict(&self, row: &[FeatureValue]) -> f64;


    /// Predicts the target values of all rows of `sample`.
    fn predict_all(&self, sample: &Sample) -> Vec<f64>
        where Self: Sync,
    {
        sample.rows()
            .par_iter()
            .map(|row| self.predict(row))
            .collect::<Vec<_>>()
    }
}
