//! Builds the Huffman code tree from a frequency map.
//!
//! The two lightest nodes in the queue are repeatedly merged under a new parent whose weight is
//! their sum, until a single node remains. That node is the root.
//!

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use super::symbol::Symbol;
use super::FrequencyMap;
use crate::error::{Error, Result};

/// Payload of a code tree node. Internal nodes carry no symbol and are never encoded.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    Kids { zero: Box<Node>, one: Box<Node> },
    Leaf(Symbol),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    /// Frequency for a leaf, sum of both children for an internal node.
    pub weight: u64,
    pub node_data: NodeData,
}

impl Node {
    /// Create a new node
    pub fn new(weight: u64, node_data: NodeData) -> Node {
        Node { weight, node_data }
    }

    /// The node reached by following `bit` (false = zero child). None for a leaf.
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match &self.node_data {
            NodeData::Kids { zero, one } => Some(if bit { &**one } else { &**zero }),
            NodeData::Leaf(_) => None,
        }
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self.node_data {
            NodeData::Leaf(symbol) => Some(symbol),
            NodeData::Kids { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }
}

/// An immutable Huffman code tree.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CodeTree {
    root: Node,
}

impl CodeTree {
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Total weight, equal to the sum of all leaf frequencies.
    pub fn weight(&self) -> u64 {
        self.root.weight
    }

    /// Number of leaves, one per symbol in the frequency map.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match &node.node_data {
                NodeData::Kids { zero, one } => {
                    stack.push(&**one);
                    stack.push(&**zero);
                }
                NodeData::Leaf(_) => count += 1,
            }
        }
        count
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(&self.root, 0_usize)];
        while let Some((node, depth)) = stack.pop() {
            match &node.node_data {
                NodeData::Kids { zero, one } => {
                    stack.push((&**one, depth + 1));
                    stack.push((&**zero, depth + 1));
                }
                NodeData::Leaf(_) => deepest = deepest.max(depth),
            }
        }
        deepest
    }
}

/// Entry in the merge queue. `seq` is the order the entry was queued in.
#[derive(Debug)]
struct Queued {
    seq: u64,
    node: Node,
}

impl Ord for Queued {
    /// Reversed, so the max-heap pops the lightest node, and the earliest queued among equals.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .weight
            .cmp(&self.node.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

/// Build the code tree for `freqs`. The first node popped in each merge becomes the zero child.
/// Fails with BuildPrecondition if the map is empty.
pub fn build_code_tree(freqs: &FrequencyMap) -> Result<CodeTree> {
    // Leaves go in ascending symbol order, which fixes the tie-break for equal weights
    let mut queue: BinaryHeap<Queued> = freqs
        .iter()
        .enumerate()
        .map(|(i, (&symbol, &weight))| Queued {
            seq: i as u64,
            node: Node::new(weight, NodeData::Leaf(symbol)),
        })
        .collect();
    let mut seq = queue.len() as u64;

    loop {
        let zero = match queue.pop() {
            Some(entry) => entry.node,
            None => return Err(Error::BuildPrecondition),
        };
        let one = match queue.pop() {
            Some(entry) => entry.node,
            None => {
                debug!(
                    "Built code tree over {} symbols with total weight {}",
                    freqs.len(),
                    zero.weight
                );
                return Ok(CodeTree { root: zero });
            }
        };
        let weight = zero.weight.saturating_add(one.weight);
        queue.push(Queued {
            seq,
            node: Node::new(
                weight,
                NodeData::Kids {
                    zero: Box::new(zero),
                    one: Box::new(one),
                },
            ),
        });
        seq += 1;
    }
}
