//! Prefix tree construction.
//!
//! Builds a Huffman tree from a [`FrequencyTable`] with a binary min-heap.
//!
//! # Tie-breaking
//!
//! Every node receives a sequence number when it is created: leaves in the
//! table's first-observed order, merged nodes after them in merge order.
//! The heap orders by `(frequency, sequence)`, so equal frequencies always
//! resolve the same way regardless of heap internals. The first node popped
//! becomes the left child, the second the right child.
//!
//! # Single-symbol tables
//!
//! A lone leaf cannot carry a non-empty code, so it is wrapped in an internal
//! root with the leaf on the left and no right child. Its code is `0`.

use crate::frequency::FrequencyTable;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A node of the prefix tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A symbol and its frequency
    Leaf { symbol: u8, frequency: u64 },

    /// Two subtrees; `frequency` is the sum of the children.
    ///
    /// `right` is `None` only for the root of a single-symbol tree.
    Internal {
        left: Box<Node>,
        right: Option<Box<Node>>,
        frequency: u64,
    },
}

impl Node {
    /// Frequency carried by this node.
    pub fn frequency(&self) -> u64 {
        match self {
            Node::Leaf { frequency, .. } | Node::Internal { frequency, .. } => *frequency,
        }
    }

    fn merge(left: Node, right: Node) -> Node {
        let frequency = left.frequency() + right.frequency();
        Node::Internal {
            left: Box::new(left),
            right: Some(Box::new(right)),
            frequency,
        }
    }
}

/// A node waiting in the build heap.
#[derive(Debug)]
struct QueuedNode {
    frequency: u64,
    sequence: u64,
    node: Node,
}

impl QueuedNode {
    fn key(&self) -> (u64, u64) {
        (self.frequency, self.sequence)
    }
}

impl PartialEq for QueuedNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueuedNode {}

impl PartialOrd for QueuedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap: lowest frequency, then oldest node, first
        other.key().cmp(&self.key())
    }
}

/// A complete prefix tree.
///
/// Created once per compression (or per decompression, from the stored
/// table) and dropped once the code book has been derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTree {
    root: Node,
}

impl PrefixTree {
    /// Build the tree for `table`.
    ///
    /// A `FrequencyTable` is never empty, so there is always a root.
    pub fn build(table: &FrequencyTable) -> Self {
        let mut heap: BinaryHeap<QueuedNode> = table
            .iter()
            .enumerate()
            .map(|(sequence, (symbol, frequency))| QueuedNode {
                frequency,
                sequence: sequence as u64,
                node: Node::Leaf { symbol, frequency },
            })
            .collect();
        let mut next_sequence = heap.len() as u64;

        let last = loop {
            match (heap.pop(), heap.pop()) {
                (Some(left), Some(right)) => {
                    let merged = Node::merge(left.node, right.node);
                    heap.push(QueuedNode {
                        frequency: merged.frequency(),
                        sequence: next_sequence,
                        node: merged,
                    });
                    next_sequence += 1;
                }
                (Some(last), None) => break last.node,
                // FrequencyTable construction rejects empty input
                (None, _) => unreachable!("frequency table has no symbols"),
            }
        };

        let root = match last {
            leaf @ Node::Leaf { .. } => Node::Internal {
                frequency: leaf.frequency(),
                left: Box::new(leaf),
                right: None,
            },
            internal => internal,
        };

        let tree = Self { root };
        log::debug!(
            "built prefix tree: {} leaves, depth {}",
            tree.leaf_count(),
            tree.depth()
        );
        tree
    }

    /// The root node (always `Node::Internal`).
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                Node::Leaf { .. } => deepest = deepest.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((left, depth + 1));
                    if let Some(right) = right {
                        stack.push((right, depth + 1));
                    }
                }
            }
        }
        deepest
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { .. } => count += 1,
                Node::Internal { left, right, .. } => {
                    stack.push(left);
                    if let Some(right) = right {
                        stack.push(right);
                    }
                }
            }
        }
        count
    }
}
