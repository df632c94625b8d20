use tracing::{debug, info, instrument};

use crate::common::{
    constants::PARALLEL_THRESHOLD,
    utils,
    Depth,
    Impurity,
    LeftRight,
};
use crate::error::{SplitError, TreeError};
use crate::{Row, Sample};
use super::leaf::LeafStrategy;
use super::regressor::RegressionTreeRegressor;
use super::splitter::{Splitter, VarianceSplitter};
use super::train_node::TrainNode;

use std::fmt;


/// `RegressionTree` is the factory that generates
/// a [`RegressionTreeRegressor`] for given training rows.
///
/// Build one with [`RegressionTreeBuilder`](crate::RegressionTreeBuilder).
///
/// # Example
/// ```
/// use regtree::prelude::*;
///
/// let rows = (0..8)
///     .map(|i| {
///         let x = i as f64;
///         Row::numeric(&[x], if x < 4.0 { 0.0 } else { 1.0 })
///     })
///     .collect::<Vec<_>>();
///
/// let tree = RegressionTreeBuilder::new()
///     .max_depth(2)
///     .build();
///
/// let (model, importance) = tree.train(&rows, None).unwrap();
///
/// let x = [FeatureValue::Numeric(6.0)];
/// assert_eq!(model.predict(&x), 1.0);
/// assert_eq!(importance, vec![1.0]);
/// ```
pub struct RegressionTree<S = VarianceSplitter> {
    // The split search
    splitter: S,


    // How leaves turn their rows into a prediction
    leaf_strategy: LeafStrategy,


    // The maximal depth of the output trees
    max_depth: Depth,


    // Nodes with at most this many rows become leaves
    min_leaf_instances: usize,


    // Build large subtrees on the rayon pool
    parallel: bool,
}


impl<S> RegressionTree<S> {
    #[inline]
    pub(super) fn from_components(
        splitter: S,
        leaf_strategy: LeafStrategy,
        max_depth: Depth,
        min_leaf_instances: usize,
        parallel: bool,
    ) -> Self
    {
        Self { splitter, leaf_strategy, max_depth, min_leaf_instances, parallel, }
    }


    /// Returns the maximal depth of the output trees.
    #[inline]
    pub fn max_depth(&self) -> Depth {
        self.max_depth
    }


    /// Returns the minimal number of rows a node must exceed to be split.
    #[inline]
    pub fn min_leaf_instances(&self) -> usize {
        self.min_leaf_instances
    }


    /// Returns the leaf strategy.
    #[inline]
    pub fn leaf_strategy(&self) -> &LeafStrategy {
        &self.leaf_strategy
    }


    /// Returns the split search.
    #[inline]
    pub fn splitter(&self) -> &S {
        &self.splitter
    }


    /// Returns `true` if a node of `n_sample` rows must be a leaf
    /// regardless of the rows themselves.
    #[inline]
    fn is_small(&self, n_sample: usize) -> bool {
        n_sample <= self.min_leaf_instances.max(1)
    }
}


impl<S> RegressionTree<S>
    where S: Splitter,
{
    /// Train a regression tree on `rows`.
    ///
    /// `weights` defaults to `1.0` per row.
    /// Rows with a non-positive weight are ignored,
    /// and a weight of `+inf` is rejected.
    /// Returns the trained tree and its feature importance,
    /// normalized to sum to `1` unless every entry is `0`.
    #[instrument(skip_all, fields(n_rows = rows.len()))]
    pub fn train(&self, rows: &[Row], weights: Option<&[f64]>)
        -> Result<(RegressionTreeRegressor, Vec<f64>), TreeError>
    {
        let sample = Sample::from_rows(rows, weights)?;
        self.fit(&sample)
    }


    /// Train a regression tree on an already encoded [`Sample`].
    pub fn fit(&self, sample: &Sample)
        -> Result<(RegressionTreeRegressor, Vec<f64>), TreeError>
    {
        let (n_sample, n_feature) = sample.shape();
        debug!(n_sample, n_feature, "growing a regression tree");

        let root = self.grow(sample, sample.indices(), self.max_depth)?;

        let mut importance = root.importance().to_vec();
        utils::normalize(&mut importance);

        let n_leaves = root.leaves();
        let root = root.into_node();
        info!(n_leaves, depth = root.depth(), "trained a regression tree");

        let regressor = RegressionTreeRegressor::new(
            root,
            sample.encoding().clone(),
            importance.clone(),
        );
        Ok((regressor, importance))
    }


    fn grow(
        &self,
        sample: &Sample,
        indices: Vec<usize>,
        depth: Depth,
    ) -> Result<TrainNode, TreeError>
    {
        let n_sample = indices.len();
        let impurity = utils::impurity(sample, &indices[..]);

        // Stop before asking for a split.
        if self.is_small(n_sample) || depth.is_exhausted() {
            return self.construct_leaf(sample, &indices[..], impurity);
        }

        // Find the best splitting rule.
        let candidate = match self.splitter.best_split(sample, &indices[..])? {
            Some(candidate) => candidate,
            None => return self.construct_leaf(sample, &indices[..], impurity),
        };
        let split = candidate.split;

        let n_feature = sample.shape().1;
        if split.feature >= n_feature {
            let feature = split.feature;
            return Err(SplitError::FeatureOutOfRange { feature, n_feature }.into());
        }

        // Split the train data for left/right childrens
        let mut lindices = Vec::new();
        let mut rindices = Vec::new();
        for &i in indices.iter() {
            match split.split(sample.row(i)) {
                LeftRight::Left  => { lindices.push(i); },
                LeftRight::Right => { rindices.push(i); },
            }
        }

        // If the split has no meaning, construct a leaf node.
        if lindices.is_empty() || rindices.is_empty() {
            return self.construct_leaf(sample, &indices[..], impurity);
        }
        debug!(
            %split,
            improvement = candidate.improvement,
            n_left = lindices.len(),
            n_right = rindices.len(),
            "split a node"
        );

        let depth = depth - 1;
        let (ltree, rtree) = if self.parallel && n_sample >= PARALLEL_THRESHOLD {
            let (ltree, rtree) = rayon::join(
                || self.grow(sample, lindices, depth),
                || self.grow(sample, rindices, depth),
            );
            (ltree?, rtree?)
        } else {
            let ltree = self.grow(sample, lindices, depth)?;
            let rtree = self.grow(sample, rindices, depth)?;
            (ltree, rtree)
        };

        Ok(TrainNode::branch(split, ltree, rtree, impurity))
    }


    #[inline]
    fn construct_leaf(
        &self,
        sample: &Sample,
        indices: &[usize],
        impurity: Impurity,
    ) -> Result<TrainNode, TreeError>
    {
        let model = self.leaf_strategy.fit(sample, indices)?;
        debug!(n_sample = indices.len(), %model, "construct a leaf");
        let n_feature = sample.shape().1;
        Ok(TrainNode::leaf(model, impurity, n_feature, indices.len()))
    }
}


impl<S> RegressionTree<S>
    where S: Splitter,
{
    /// Returns the name of this learner.
    pub fn name(&self) -> &str {
        "Regression Tree"
    }


    /// Returns the parameters of this learner as `(name, value)` pairs.
    pub fn info(&self) -> Vec<(&str, String)> {
        Vec::from([
            ("Max depth", self.max_depth.to_string()),
            ("Min leaf instances", self.min_leaf_instances.to_string()),
            ("Split criterion", self.splitter.name().to_string()),
            ("Leaf model", self.leaf_strategy.to_string()),
            ("Parallel", self.parallel.to_string()),
        ])
    }
}


impl<S> fmt::Display for RegressionTree<S>
    where S: Splitter,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----------\n# {}\n", self.name())?;
        let width = self.info()
            .iter()
            .map(|(key, _)| key.len())
            .max()
            .unwrap_or(0);
        for (key, value) in self.info() {
            writeln!(f, "- {key: <width$}: {value}")?;
        }
        write!(f, "----------")
    }
}
