use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use crate::error::TreeError;
use crate::hypothesis::{Prediction, PredictionResult};
use crate::{FeatureEncoding, FeatureValue, RawValue, Regressor};
use super::node::Node;


/// Regression Tree regressor.
///
/// The prediction tree together with the encoding of the training columns
/// and the normalized feature importance measured while training.
/// It holds no training rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTreeRegressor {
    root: Node,
    encoding: FeatureEncoding,
    importance: Vec<f64>,
}


impl RegressionTreeRegressor {
    #[inline]
    pub(crate) fn new(
        root: Node,
        encoding: FeatureEncoding,
        importance: Vec<f64>,
    ) -> Self
    {
        Self { root, encoding, importance }
    }


    /// Returns the value, gradient, and depth for each of `rows`.
    pub fn transform(&self, rows: &[Vec<FeatureValue>]) -> PredictionResult {
        let predictions = rows.par_iter()
            .map(|row| self.evaluate(row))
            .collect::<Vec<_>>();
        PredictionResult::new(predictions)
    }


    /// Returns the value, gradient, and depth for a single row.
    #[inline]
    pub fn evaluate(&self, row: &[FeatureValue]) -> Prediction {
        self.root.evaluate(row)
    }


    /// Encode a raw row with the training encoding and predict it.
    pub fn predict_raw(&self, row: &[RawValue]) -> Result<f64, TreeError> {
        let row = self.encoding.encode_row(row)?;
        Ok(self.predict(&row))
    }


    /// Returns the feature importance stored at training time.
    #[inline]
    pub fn feature_importance(&self) -> &[f64] {
        &self.importance[..]
    }


    /// Returns the encoding of the training columns.
    #[inline]
    pub fn encoding(&self) -> &FeatureEncoding {
        &self.encoding
    }


    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }


    /// Returns the number of leaves.
    #[inline]
    pub fn n_leaves(&self) -> usize {
        self.root.leaves()
    }


    /// Returns the depth of the tree. A single leaf has depth `0`.
    #[inline]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }


    /// Serialize this model to a JSON string.
    pub fn to_json(&self) -> Result<String, TreeError> {
        let json = serde_json::to_string(self)?;
        Ok(json)
    }


    /// Deserialize a model written by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        let mut model: Self = serde_json::from_str(json)?;
        model.encoding.reindex();
        Ok(model)
    }


    /// Write the current regression tree to dot file.
    pub fn to_dot_file<P>(&self, path: P) -> Result<(), TreeError>
        where P: AsRef<Path>
    {
        let mut f = File::create(path)?;
        f.write_all(b"graph RegressionTree {\n")?;

        let info = self.root.to_dot_info(0).0;
        for line in info {
            f.write_all(line.as_bytes())?;
        }

        f.write_all(b"}\n")?;

        Ok(())
    }
}


impl Regressor for RegressionTreeRegressor {
    #[inline]
    fn predict(&self, row: &[FeatureValue]) -> f64 {
        self.root.predict(row)
    }
}
