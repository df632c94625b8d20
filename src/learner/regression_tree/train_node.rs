//! Defines the inner representation
//! of the Regression Tree class.
//!
//! A `TrainNode` is resolved exactly once, when it is constructed:
//! its children (or its leaf model) and its feature importance
//! are computed bottom-up and cached in the node,
//! so exporting the tree and reading the importance see the same split.
use std::fmt;

use crate::common::Impurity;
use super::leaf::LeafModel;
use super::node::Node;
use super::split_rule::Split;


/// Enumeration of `TrainBranchNode` and `TrainLeafNode`.
pub(crate) enum TrainNode {
    /// A node that have two childrens.
    Branch(TrainBranchNode),


    /// A node that have no child.
    Leaf(TrainLeafNode),
}


/// Represents the branch nodes of regression tree.
/// Each `TrainBranchNode` must have two childrens
pub(crate) struct TrainBranchNode {
    // Splitting rule
    split: Split,


    // Left child
    left: Box<TrainNode>,


    // Right child
    right: Box<TrainNode>,


    // Impurity of the rows reaching this node
    impurity: Impurity,


    // Unnormalized feature importance of this sub-tree
    importance: Vec<f64>,


    leaves: usize,
}


/// Represents the leaf nodes of regression tree.
pub(crate) struct TrainLeafNode {
    model: LeafModel,
    impurity: Impurity,
    importance: Vec<f64>,
    n_sample: usize,
}


impl TrainNode {
    /// Construct a leaf node.
    /// Its importance is the one the leaf model exposes,
    /// or the zero vector.
    #[inline]
    pub(super) fn leaf(
        model: LeafModel,
        impurity: Impurity,
        n_feature: usize,
        n_sample: usize,
    ) -> Self
    {
        let importance = model.importance()
            .map(<[f64]>::to_vec)
            .unwrap_or_else(|| vec![0f64; n_feature]);
        debug_assert_eq!(importance.len(), n_feature);

        let leaf = TrainLeafNode { model, impurity, importance, n_sample };
        TrainNode::Leaf(leaf)
    }


    /// Construct a branch node from the arguments.
    /// The importance of the children is summed and the impurity decrease
    /// `impurity - left.impurity - right.impurity`
    /// is credited to the split feature.
    #[inline]
    pub(super) fn branch(
        split: Split,
        left: TrainNode,
        right: TrainNode,
        impurity: Impurity,
    ) -> Self
    {
        let leaves = left.leaves() + right.leaves();

        let mut importance = left.importance()
            .iter()
            .zip(right.importance())
            .map(|(l, r)| l + r)
            .collect::<Vec<_>>();
        let decrease = impurity - left.impurity() - right.impurity();
        importance[split.feature] += decrease.0;

        let node = TrainBranchNode {
            split,
            left: Box::new(left),
            right: Box::new(right),
            impurity,
            importance,
            leaves,
        };

        TrainNode::Branch(node)
    }


    /// Returns the number of leaves of this sub-tree.
    #[inline]
    pub(super) fn leaves(&self) -> usize {
        match self {
            TrainNode::Branch(ref node) => node.leaves,
            TrainNode::Leaf(_) => 1_usize
        }
    }


    /// Returns the impurity of the rows reaching this node.
    #[inline]
    pub(super) fn impurity(&self) -> Impurity {
        match self {
            TrainNode::Branch(ref node) => node.impurity,
            TrainNode::Leaf(ref node) => node.impurity,
        }
    }


    /// Returns the unnormalized importance of this sub-tree.
    #[inline]
    pub(super) fn importance(&self) -> &[f64] {
        match self {
            TrainNode::Branch(ref node) => &node.importance[..],
            TrainNode::Leaf(ref node) => &node.importance[..],
        }
    }


    /// Strip the training statistics and export the prediction tree.
    pub(super) fn into_node(self) -> Node {
        match self {
            TrainNode::Branch(node) => {
                let left = Box::new(node.left.into_node());
                let right = Box::new(node.right.into_node());
                Node::branch(node.split, left, right)
            },
            TrainNode::Leaf(node) => Node::leaf(node.model),
        }
    }
}


// ------------------------------------------------------------
// Some debug code

impl fmt::Debug for TrainBranchNode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainBranchNode")
            .field("split", &self.split)
            .field("leaves", &self.leaves)
            .field("impurity", &self.impurity.0)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}


impl fmt::Debug for TrainLeafNode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainLeafNode")
            .field("model", &self.model)
            .field("impurity", &self.impurity.0)
            .field("n_sample", &self.n_sample)
            .finish()
    }
}


impl fmt::Debug for TrainNode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainNode::Branch(branch) => {
                write!(f, "{:?}", branch)
            },
            TrainNode::Leaf(leaf) => {
                write!(f, "{:?}", leaf)
            },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn constant(value: f64, impurity: f64) -> TrainNode {
        TrainNode::leaf(
            LeafModel::Constant { value },
            Impurity(impurity),
            3,
            1,
        )
    }

    #[test]
    fn test_leaf_importance_is_zero() {
        let leaf = constant(1.0, 4.0);
        assert_eq!(leaf.importance(), &[0.0, 0.0, 0.0]);
        assert_eq!(leaf.leaves(), 1);
    }

    #[test]
    fn test_branch_importance_bookkeeping() {
        // (10 - 3 - 2) = 5 to feature 2 from the lower branch,
        // then (20 - 10 - 1) = 9 to feature 0 from the root.
        let lower = TrainNode::branch(
            Split::threshold(2, 0.5),
            constant(0.0, 3.0),
            constant(1.0, 2.0),
            Impurity(10.0),
        );
        let root = TrainNode::branch(
            Split::threshold(0, 0.5),
            lower,
            constant(2.0, 1.0),
            Impurity(20.0),
        );

        assert_eq!(root.importance(), &[9.0, 0.0, 5.0]);
        assert_eq!(root.leaves(), 3);
        assert_eq!(root.impurity(), 20.0);

        let node = root.into_node();
        assert_eq!(node.leaves(), 3);
        assert_eq!(node.depth(), 2);
    }
}
