use crate::common::{constants::DEFAULT_MIN_LEAF_INSTANCES, Depth};
use super::leaf::LeafStrategy;
use super::rtree::RegressionTree;
use super::splitter::{Splitter, VarianceSplitter};


/// A struct that builds `RegressionTree`.
/// `RegressionTreeBuilder` keeps parameters for constructing `RegressionTree`.
///
/// # Example
///
/// ```
/// use regtree::prelude::*;
///
/// let tree = RegressionTreeBuilder::new()
///     .max_depth(4)
///     .min_leaf_instances(5)
///     .leaf_strategy(LeafStrategy::linear(LinearRegression::new()))
///     .splitter(VarianceSplitter::new().min_child_weight(1.0))
///     .build();
/// assert_eq!(tree.min_leaf_instances(), 5);
/// ```
#[derive(Clone)]
pub struct RegressionTreeBuilder<S = VarianceSplitter> {
    splitter: S,


    leaf_strategy: LeafStrategy,


    // `None` means the depth is not bounded.
    max_depth: Option<usize>,


    min_leaf_instances: usize,


    parallel: bool,
}


impl RegressionTreeBuilder {
    /// Construct a new instance of `RegressionTreeBuilder`.
    /// By default,
    /// `RegressionTreeBuilder` sets the parameters as follows;
    /// ```text
    /// splitter: VarianceSplitter::new(),
    /// leaf_strategy: LeafStrategy::ConstantMean,
    /// max_depth: unbounded,
    /// min_leaf_instances: DEFAULT_MIN_LEAF_INSTANCES == 1,
    /// parallel: true,
    /// ```
    pub fn new() -> Self {
        Self {
            splitter: VarianceSplitter::new(),
            leaf_strategy: LeafStrategy::default(),
            max_depth: None,
            min_leaf_instances: DEFAULT_MIN_LEAF_INSTANCES,
            parallel: true,
        }
    }
}


impl Default for RegressionTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}


impl<S> RegressionTreeBuilder<S> {
    /// Specify the maximal depth of the tree.
    /// A depth of `0` yields a single leaf.
    /// By default the depth is not bounded.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }


    /// Nodes with at most `n` rows are not split.
    /// Values below `1` act as `1`.
    /// Default is `1`.
    pub fn min_leaf_instances(mut self, n: usize) -> Self {
        self.min_leaf_instances = n;
        self
    }


    /// Set how the leaves predict.
    /// Default is [`LeafStrategy::ConstantMean`].
    pub fn leaf_strategy(mut self, strategy: LeafStrategy) -> Self {
        self.leaf_strategy = strategy;
        self
    }


    /// Grow the children of large nodes on the rayon thread pool.
    /// The trained tree does not depend on this flag.
    /// Default is `true`.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }


    /// Replace the split search.
    pub fn splitter<T>(self, splitter: T) -> RegressionTreeBuilder<T>
        where T: Splitter,
    {
        RegressionTreeBuilder {
            splitter,
            leaf_strategy: self.leaf_strategy,
            max_depth: self.max_depth,
            min_leaf_instances: self.min_leaf_instances,
            parallel: self.parallel,
        }
    }
}


impl<S> RegressionTreeBuilder<S>
    where S: Splitter,
{
    /// Build a `RegressionTree`.
    /// This method consumes `self`.
    pub fn build(self) -> RegressionTree<S> {
        RegressionTree::from_components(
            self.splitter,
            self.leaf_strategy,
            Depth::from(self.max_depth),
            self.min_leaf_instances,
            self.parallel,
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let tree = RegressionTreeBuilder::new().build();
        assert_eq!(tree.max_depth(), Depth::unbounded());
        assert_eq!(tree.min_leaf_instances(), DEFAULT_MIN_LEAF_INSTANCES);
        assert_eq!(tree.leaf_strategy(), &LeafStrategy::ConstantMean);
        assert_eq!(tree.splitter(), &VarianceSplitter::new());
    }

    #[test]
    fn test_max_depth() {
        let tree = RegressionTreeBuilder::new().max_depth(3).build();
        let exp = Depth::from(3);
        let res = tree.max_depth();
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }
}
