#![warn(missing_docs)]

//!
//! A crate that grows regression trees.
//!
//! Given weighted training rows whose features are numbers or strings
//! and whose labels are real numbers,
//! [`RegressionTree`] recursively partitions the rows
//! with a pluggable [`Splitter`]
//! and fits a model on each leaf.
//! Leaves either predict the weighted mean of their labels
//! or delegate to a [`LinearRegression`].
//!
//! Training returns an immutable [`RegressionTreeRegressor`]
//! and a normalized feature importance vector.
//! The regressor reports, for each input,
//! the predicted value, the gradient of the leaf model (if any),
//! and the depth of the leaf that answered.
//!
//! ```
//! use regtree::prelude::*;
//!
//! let rows = vec![
//!     Row::new(vec!["a".into(), 1.0.into()], 3.0.into()),
//!     Row::new(vec!["b".into(), 2.0.into()], 5.0.into()),
//!     Row::new(vec!["a".into(), 3.0.into()], 3.0.into()),
//! ];
//! let tree = RegressionTreeBuilder::new()
//!     .max_depth(3)
//!     .build();
//! let (model, importance) = tree.train(&rows, None).unwrap();
//!
//! assert_eq!(model.predict_raw(&["b".into(), 0.0.into()]).unwrap(), 5.0);
//! assert_eq!(importance.iter().sum::<f64>(), 1.0);
//! ```

pub mod common;
pub mod error;
pub mod sample;
pub mod hypothesis;
pub mod learner;
pub mod prelude;


pub use error::{TreeError, SplitError};

pub use sample::{
    Sample,
    Row,
    RawValue,
    FeatureValue,
    CategoricalEncoder,
    FeatureEncoding,
};

pub use hypothesis::{
    Regressor,
    Prediction,
    PredictionResult,
};

pub use learner::{
    RegressionTree,
    RegressionTreeBuilder,
    RegressionTreeRegressor,
    Node,
    Split,
    SplitRule,
    Splitter,
    SplitCandidate,
    VarianceSplitter,
    LeafStrategy,
    DelegatedLearner,
    LeafModel,
    LinearRegression,
    LinearModel,
};
