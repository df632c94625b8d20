//! Leaf models of a regression tree.
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::common::utils;
use crate::error::TreeError;
use crate::learner::linear_regression::{LinearRegression, LinearModel};
use crate::{FeatureValue, Regressor, Sample};


/// A regression learner that a leaf can delegate to.
#[derive(Debug, Clone, PartialEq)]
pub enum DelegatedLearner {
    /// Weighted ridge regression.
    Linear(LinearRegression),
}


impl DelegatedLearner {
    #[inline]
    fn fit(&self, sample: &Sample, indices: &[usize])
        -> Result<LeafModel, TreeError>
    {
        match self {
            Self::Linear(learner) => {
                learner.fit(sample, indices).map(LeafModel::Linear)
            },
        }
    }
}


/// How the rows of a leaf become a prediction.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LeafStrategy {
    /// Predict the weighted mean of the labels.
    #[default]
    ConstantMean,

    /// Fit a regression learner on the rows of the leaf.
    Delegated(DelegatedLearner),
}


impl LeafStrategy {
    /// Shorthand for a leaf that fits a [`LinearRegression`].
    #[inline]
    pub fn linear(learner: LinearRegression) -> Self {
        Self::Delegated(DelegatedLearner::Linear(learner))
    }


    /// Fit the leaf model on the rows `indices` of `sample`.
    pub(crate) fn fit(&self, sample: &Sample, indices: &[usize])
        -> Result<LeafModel, TreeError>
    {
        match self {
            Self::ConstantMean => {
                let value = utils::weighted_mean(sample, indices);
                Ok(LeafModel::Constant { value })
            },
            Self::Delegated(learner) => learner.fit(sample, indices),
        }
    }
}


impl fmt::Display for LeafStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConstantMean => write!(f, "Constant (weighted mean)"),
            Self::Delegated(DelegatedLearner::Linear(learner)) => {
                write!(f, "Linear regression (ridge: {})", learner.ridge_penalty())
            },
        }
    }
}


/// The fitted model held by a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LeafModel {
    /// A constant prediction.
    Constant {
        /// The predicted value.
        value: f64,
    },

    /// A fitted linear model.
    Linear(LinearModel),
}


impl LeafModel {
    /// Returns the gradient of the prediction, if the model has one.
    #[inline]
    pub fn gradient(&self) -> Option<Vec<f64>> {
        match self {
            Self::Constant { .. } => None,
            Self::Linear(model) => Some(model.coefficients().to_vec()),
        }
    }


    /// Returns the feature importance vector the model exposes, if any.
    #[inline]
    pub fn importance(&self) -> Option<&[f64]> {
        match self {
            Self::Constant { .. } => None,
            Self::Linear(model) => Some(model.importance()),
        }
    }
}


impl Regressor for LeafModel {
    #[inline]
    fn predict(&self, row: &[FeatureValue]) -> f64 {
        match self {
            Self::Constant { value } => *value,
            Self::Linear(model) => model.predict(row),
        }
    }
}


impl fmt::Display for LeafModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant { value } => write!(f, "{value:.4}"),
            Self::Linear(model) => write!(f, "{model}"),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::Row;

    #[test]
    fn test_constant_mean_leaf() {
        let rows = vec![Row::numeric(&[0.0], 1.0), Row::numeric(&[1.0], 4.0)];
        let sample = Sample::from_rows(&rows, Some(&[2.0, 1.0])).unwrap();
        let leaf = LeafStrategy::ConstantMean
            .fit(&sample, &sample.indices())
            .unwrap();

        let res = leaf.predict(sample.row(0));
        assert!((res - 2.0).abs() < 1e-12, "expected 2.0, got {res}.");
        assert!(leaf.gradient().is_none());
        assert!(leaf.importance().is_none());
    }

    #[test]
    fn test_linear_leaf_exposes_gradient() {
        let rows = (0..10)
            .map(|i| {
                let x = i as f64;
                Row::numeric(&[x, 1.0], 2.0 * x + 1.0)
            })
            .collect::<Vec<_>>();
        let sample = Sample::from_rows(&rows, None).unwrap();
        let leaf = LeafStrategy::linear(LinearRegression::new())
            .fit(&sample, &sample.indices())
            .unwrap();

        let gradient = leaf.gradient().expect("linear leaves have a gradient");
        assert!((gradient[0] - 2.0).abs() < 1e-6, "got {gradient:?}.");
        assert!(gradient[1].abs() < 1e-6, "got {gradient:?}.");

        let importance = leaf.importance().expect("linear leaves rank features");
        assert_eq!(importance, &[1.0, 0.0]);
    }
}
