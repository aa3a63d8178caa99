//! Undirected edge between two element nodes.

use serde::{Deserialize, Serialize};
use super::NodeIndex;

/// An undirected edge. `src` is the element whose connection list produced
/// the edge first, `dst` the element it referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub src: NodeIndex,
    pub dst: NodeIndex,
}

impl GraphEdge {
    pub fn new(src: usize, dst: usize) -> Self {
        Self { src: NodeIndex(src), dst: NodeIndex(dst) }
    }

    /// Order-independent key: `(min, max)`.
    pub fn canonical(&self) -> (NodeIndex, NodeIndex) {
        if self.src <= self.dst { (self.src, self.dst) } else { (self.dst, self.src) }
    }

    /// True if this edge joins `a` and `b` in either direction.
    pub fn connects(&self, a: NodeIndex, b: NodeIndex) -> bool {
        (self.src == a && self.dst == b) || (self.src == b && self.dst == a)
    }

    pub fn is_self_loop(&self) -> bool {
        self.src == self.dst
    }

    /// The "other" end of the edge from the given node.
    pub fn other_node(&self, from: NodeIndex) -> Option<NodeIndex> {
        if from == self.src { Some(self.dst) }
        else if from == self.dst { Some(self.src) }
        else { None }
    }
}
