//! Defines some common functions and types used in this library.

/// Numeric tolerances and default parameters.
pub mod constants;

/// Defines some useful functions such as weighted means.
pub mod utils;

/// Defines some checker functions.
pub(crate) mod checker;

/// Small wrapper types shared by the tree learner.
pub mod tree;

pub use tree::{Depth, Impurity, LeftRight};
