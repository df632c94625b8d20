//! Provides the regression tree learner, its builder,
//! and the trained regressor.

/// This file defines the regression tree learner.
pub mod rtree;
/// This file defines the regression tree regressor.
pub mod regressor;

/// Regression Tree builder.
pub mod builder;

/// Split rules.
pub mod split_rule;
pub mod splitter;

/// Leaf strategies and leaf models.
pub mod leaf;

/// Nodes of a trained tree.
pub mod node;
mod arena;
mod train_node;


pub use rtree::RegressionTree;
pub use regressor::RegressionTreeRegressor;
pub use builder::RegressionTreeBuilder;
pub use split_rule::{Split, SplitRule};
pub use splitter::{Splitter, SplitCandidate, VarianceSplitter};
pub use leaf::{LeafStrategy, DelegatedLearner, LeafModel};
pub use node::Node;
