//! The serialized form of a [`Node`] tree.
//!
//! A tree is written as a flat list of nodes in pre-order.
//! A branch refers to its children by their index in the list,
//! so the nesting of the output does not grow with the depth of the tree.
use serde::{Serialize, Deserialize};

use crate::common::LeftRight;
use super::leaf::LeafModel;
use super::node::Node;
use super::split_rule::Split;


/// A node whose children are indices into the arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) enum FlatNode {
    Branch {
        split: Split,
        left: usize,
        right: usize,
    },
    Leaf {
        model: LeafModel,
    },
}


/// The nodes of a tree. The root is at index `0`
/// and every child comes after its parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct NodeArena {
    nodes: Vec<FlatNode>,
}


impl From<&Node> for NodeArena {
    fn from(root: &Node) -> Self {
        let mut nodes = Vec::new();
        let mut stack = vec![(root, None)];
        while let Some((node, parent)) = stack.pop() {
            let id = nodes.len();
            if let Some((parent, side)) = parent {
                if let FlatNode::Branch { left, right, .. } = &mut nodes[parent] {
                    match side {
                        LeftRight::Left => *left = id,
                        LeftRight::Right => *right = id,
                    }
                }
            }

            match node {
                Node::Branch { split, left, right } => {
                    let split = split.clone();
                    nodes.push(FlatNode::Branch { split, left: 0, right: 0 });
                    // Pop the left child first.
                    stack.push((right.as_ref(), Some((id, LeftRight::Right))));
                    stack.push((left.as_ref(), Some((id, LeftRight::Left))));
                },
                Node::Leaf { model } => {
                    nodes.push(FlatNode::Leaf { model: model.clone() });
                },
            }
        }
        Self { nodes }
    }
}


impl TryFrom<NodeArena> for Node {
    type Error = String;


    fn try_from(arena: NodeArena) -> Result<Self, Self::Error> {
        let n_nodes = arena.nodes.len();
        if n_nodes == 0 {
            return Err("a tree has at least one node".to_string());
        }

        // Children come after their parent,
        // so building from the back sees them first.
        let mut built: Vec<Option<Node>> = Vec::with_capacity(n_nodes);
        built.resize_with(n_nodes, || None);
        for (id, node) in arena.nodes.into_iter().enumerate().rev() {
            let node = match node {
                FlatNode::Leaf { model } => Node::leaf(model),
                FlatNode::Branch { split, left, right } => {
                    let left = take_child(&mut built, id, left)?;
                    let right = take_child(&mut built, id, right)?;
                    Node::branch(split, Box::new(left), Box::new(right))
                },
            };
            built[id] = Some(node);
        }

        if let Some(id) = built.iter().skip(1).position(Option::is_some) {
            return Err(format!("node {} is not reachable from the root", id + 1));
        }
        built[0].take()
            .ok_or_else(|| "the root is missing".to_string())
    }
}


fn take_child(built: &mut [Option<Node>], parent: usize, child: usize)
    -> Result<Node, String>
{
    if child <= parent || child >= built.len() {
        return Err(format!(
            "node {parent} points to node {child}, \
             expected an index in {}..{}",
            parent + 1, built.len()
        ));
    }
    built[child].take()
        .ok_or_else(|| format!("node {child} has more than one parent"))
}
