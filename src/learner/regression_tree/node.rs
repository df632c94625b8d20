//! A node struct of a trained regression tree.
use serde::{Serialize, Serializer, Deserialize};

use std::fmt;

use crate::common::LeftRight;
use crate::hypothesis::Prediction;
use crate::{FeatureValue, Regressor};
use super::arena::NodeArena;
use super::leaf::LeafModel;
use super::split_rule::Split;


/// A node of the prediction tree.
/// It holds no reference to the training data.
///
/// A tree is serialized as a flat list of nodes in pre-order,
/// so deep trees round-trip through formats with a nesting limit.
#[derive(Clone, PartialEq, Deserialize)]
#[serde(try_from = "NodeArena")]
pub enum Node {
    /// A node with two children.
    Branch {
        /// The rule that routes a row to `left` or `right`.
        split: Split,
        /// Child for rows that satisfy `split`.
        left: Box<Node>,
        /// Child for the other rows.
        right: Box<Node>,
    },

    /// A node with no child.
    Leaf {
        /// The fitted leaf model.
        model: LeafModel,
    },
}


impl Node {
    pub(crate) fn branch(split: Split, left: Box<Node>, right: Box<Node>) -> Self {
        Self::Branch { split, left, right }
    }


    pub(crate) fn leaf(model: LeafModel) -> Self {
        Self::Leaf { model }
    }


    /// Returns the leaf `row` reaches and the number of branches visited.
    #[inline]
    pub fn leaf_of(&self, row: &[FeatureValue]) -> (&LeafModel, usize) {
        let mut node = self;
        let mut depth = 0_usize;
        loop {
            match node {
                Self::Branch { split, left, right } => {
                    node = match split.split(row) {
                        LeftRight::Left => left.as_ref(),
                        LeftRight::Right => right.as_ref(),
                    };
                    depth += 1;
                },
                Self::Leaf { model } => return (model, depth),
            }
        }
    }


    /// Returns the full prediction for `row`.
    #[inline]
    pub fn evaluate(&self, row: &[FeatureValue]) -> Prediction {
        let (model, depth) = self.leaf_of(row);
        Prediction {
            value: model.predict(row),
            gradient: model.gradient(),
            depth: Some(depth),
        }
    }


    /// Returns the number of leaves of this sub-tree.
    pub fn leaves(&self) -> usize {
        match self {
            Self::Branch { left, right, .. } => left.leaves() + right.leaves(),
            Self::Leaf { .. } => 1,
        }
    }


    /// Returns the depth of this sub-tree. A leaf has depth `0`.
    pub fn depth(&self) -> usize {
        match self {
            Self::Branch { left, right, .. } => {
                1 + left.depth().max(right.depth())
            },
            Self::Leaf { .. } => 0,
        }
    }


    pub(crate) fn to_dot_info(&self, id: usize) -> (Vec<String>, usize) {
        match self {
            Self::Branch { split, left, right } => {
                let info = format!("\tnode_{id} [ label = \"{split} ?\" ];\n");

                let left_id = id + 1;
                let (     left,  right_id) = left.to_dot_info(left_id);
                let (mut right, return_id) = right.to_dot_info(right_id);

                let mut lines = left;
                lines.push(info);
                lines.append(&mut right);

                let left_edge = format!(
                    "\tnode_{id} -- node_{left_id} [ label = \"Yes\" ];\n",
                );
                lines.push(left_edge);
                let right_edge = format!(
                    "\tnode_{id} -- node_{right_id} [ label = \"No\" ];\n",
                );
                lines.push(right_edge);

                (lines, return_id)
            },
            Self::Leaf { model } => {
                let info = format!(
                    "\tnode_{id} [ label = \"{model}\", shape = box ];\n",
                );

                (vec![info], id + 1)
            },
        }
    }
}


impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer,
    {
        NodeArena::from(self).serialize(serializer)
    }
}


impl Regressor for Node {
    fn predict(&self, row: &[FeatureValue]) -> f64 {
        match self {
            Self::Branch { split, left, right } => {
                match split.split(row) {
                    LeftRight::Left  => left.predict(row),
                    LeftRight::Right => right.predict(row),
                }
            },
            Self::Leaf { model } => model.predict(row),
        }
    }
}


impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Branch { split, left, right } => {
                f.debug_struct("Branch")
                    .field("split", &split)
                    .field("left", &left)
                    .field("right", &right)
                    .finish()
            },
            Self::Leaf { model } => {
                f.debug_struct("Leaf")
                    .field("model", &model)
                    .finish()
            },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn stump() -> Node {
        Node::branch(
            Split::threshold(0, 1.0),
            Box::new(Node::leaf(LeafModel::Constant { value: -1.0 })),
            Box::new(Node::branch(
                Split::threshold(1, 0.0),
                Box::new(Node::leaf(LeafModel::Constant { value: 2.0 })),
                Box::new(Node::leaf(LeafModel::Constant { value: 3.0 })),
            )),
        )
    }

    #[test]
    fn test_predict_and_depth() {
        let tree = stump();
        let row = [FeatureValue::Numeric(5.0), FeatureValue::Numeric(1.0)];
        let res = tree.evaluate(&row);
        assert_eq!(res.value, 3.0);
        assert_eq!(res.depth, Some(2));
        assert!(res.gradient.is_none());
        assert_eq!(tree.predict(&row), 3.0);

        let row = [FeatureValue::Numeric(0.0), FeatureValue::Numeric(1.0)];
        let res = tree.evaluate(&row);
        assert_eq!(res.value, -1.0);
        assert_eq!(res.depth, Some(1));
    }

    #[test]
    fn test_shape() {
        let tree = stump();
        assert_eq!(tree.leaves(), 3);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn test_dot_info() {
        let (lines, next) = stump().to_dot_info(0);
        assert_eq!(next, 5);
        assert_eq!(lines.iter().filter(|l| l.contains("shape = box")).count(), 3);
    }
}
