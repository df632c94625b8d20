//! Weighted linear regression, used as a delegated leaf learner.

/// Defines the linear regression learner.
pub mod linear;
/// Defines the fitted linear model.
pub mod model;

mod solver;


pub use linear::{LinearRegression, DEFAULT_RIDGE};
pub use model::LinearModel;
