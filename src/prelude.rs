//! Exports the regression tree learner and the traits it needs.
//!
pub use crate::learner::{
    // Regression tree ---------------------------
    RegressionTree,
    RegressionTreeBuilder,
    RegressionTreeRegressor,


    // Splitting ---------------------------------
    Splitter,
    VarianceSplitter,


    // Leaves ------------------------------------
    LeafStrategy,
    LinearRegression,
};


pub use crate::sample::{
    Sample,
    Row,
    RawValue,
    FeatureValue,
};


pub use crate::hypothesis::{
    Regressor,
    Prediction,
};


pub use crate::error::TreeError;
