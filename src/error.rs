//! Error types surfaced by the tree learner and its collaborators.
use thiserror::Error;

use std::error::Error as StdError;
use std::io;


/// Errors returned by [`RegressionTree::train`](crate::RegressionTree::train)
/// and the other fallible operations of this crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TreeError {
    /// The label of a training row is not a finite real number.
    #[error("the label of row {row} is not a finite number")]
    InvalidLabelType { row: usize },

    /// No training row survived the weight filter.
    #[error("no training rows remain after dropping non-positive weights")]
    EmptyTrainingSet,

    /// The split search failed. The error is passed through untouched.
    #[error(transparent)]
    Splitter(#[from] SplitError),

    /// A categorical value that was never seen while the encoder was built.
    #[error("column {column} has no code for the unseen category `{value}`")]
    UnseenCategory { column: usize, value: String },

    /// A row has a different number of features from the first row.
    #[error("row {row} has {got} features, expected {expected}")]
    RowLengthMismatch { row: usize, expected: usize, got: usize },

    /// A value whose type differs from the one fixed by the first row.
    #[error("column {column} changes its value type at row {row}")]
    MixedColumnType { column: usize, row: usize },

    /// A row to predict has a different number of features
    /// from the training rows.
    #[error("got {got} features, the model was trained on {expected}")]
    FeatureCountMismatch { expected: usize, got: usize },

    /// A value to predict whose type differs from its training column.
    #[error("column {column} does not hold the value type it was trained on")]
    ColumnTypeMismatch { column: usize },

    /// A weight that is `+inf`.
    #[error("the weight of row {row} is not finite")]
    NonFiniteWeight { row: usize },

    /// The weight slice does not have one entry per row.
    #[error("got {got} weights for {expected} rows")]
    WeightLengthMismatch { expected: usize, got: usize },

    /// The delegated leaf learner could not fit its subset.
    #[error("the linear leaf learner failed: {0}")]
    Linear(String),

    /// (De)serialization of a model failed.
    #[error("failed to (de)serialize the model")]
    Json(#[from] serde_json::Error),

    /// Writing an exported model failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}


/// Errors raised by a [`Splitter`](crate::Splitter).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SplitError {
    /// A numeric feature value that cannot be ordered (NaN).
    #[error("feature {feature} of row {row} is not comparable")]
    NonComparableValue { feature: usize, row: usize },

    /// A split on a feature the sample does not have.
    #[error("split on feature {feature}, but rows have {n_feature} features")]
    FeatureOutOfRange { feature: usize, n_feature: usize },

    /// Any failure of a user-provided splitter.
    #[error(transparent)]
    Other(Box<dyn StdError + Send + Sync>),
}
