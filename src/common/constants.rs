/// A split is accepted only if its impurity improvement exceeds
/// `GAIN_TOLERANCE` times the impurity of the node being split.
pub const GAIN_TOLERANCE: f64 = 1e-10;

/// Subsets with at least this many rows build their children
/// on separate rayon tasks.
pub const PARALLEL_THRESHOLD: usize = 2_048;

/// Default ridge penalty of the linear leaf learner.
pub const DEFAULT_RIDGE: f64 = 1e-8;

/// Default minimal number of rows a node must exceed to be split.
pub const DEFAULT_MIN_LEAF_INSTANCES: usize = 1;

/// Pivots below this value make the linear solver give up.
pub const PIVOT_TOLERANCE: f64 = 1e-300;
