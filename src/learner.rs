//! Learners provided by this crate.

/// Regression tree induction.
pub mod regression_tree;
/// Weighted linear regression.
pub mod linear_regression;


pub use regression_tree::{
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
};

pub use linear_regression::{LinearRegression, LinearModel};
