use serde::{Serialize, Deserialize};


/// The output of a tree for a single feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// The predicted value.
    pub value: f64,

    /// The gradient of the prediction with respect to the features.
    /// Only leaves fitted by a delegated learner provide one.
    pub gradient: Option<Vec<f64>>,

    /// The number of branch nodes visited before reaching the leaf.
    pub depth: Option<usize>,
}


/// The outputs of a tree for a batch of feature vectors,
/// in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    predictions: Vec<Prediction>,
}


impl PredictionResult {
    pub(crate) fn new(predictions: Vec<Prediction>) -> Self {
        Self { predictions }
    }


    /// Returns the per-input predictions.
    #[inline]
    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions[..]
    }


    /// Returns the predicted values.
    pub fn values(&self) -> Vec<f64> {
        self.predictions.iter()
            .map(|p| p.value)
            .collect()
    }


    /// Returns the depths of the leaves each input reached.
    pub fn depths(&self) -> Vec<Option<usize>> {
        self.predictions.iter()
            .map(|p| p.depth)
            .collect()
    }


    /// Returns the number of inputs.
    #[inline]
    pub fn len(&self) -> usize {
        self.predictions.len()
    }


    /// Returns `true` if the batch was empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }
}


impl IntoIterator for PredictionResult {
    type Item = Prediction;
    type IntoIter = std::vec::IntoIter<Prediction>;

    fn into_iter(self) -> Self::IntoIter {
        self.predictions.into_iter()
    }
}
