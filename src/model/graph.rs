//! The assembled graph: node table plus edge table.

use serde::{Deserialize, Serialize};
use super::{GraphEdge, GraphNode, NodeIndex};

/// Node and edge tables produced by one assembly pass.
///
/// Node `i` always sits at `nodes[i]`; lookups by id are linear scans,
/// which is fine for the project sizes this crate targets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl ElementGraph {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, index: NodeIndex) -> Option<&GraphNode> {
        self.nodes.get(index.0)
    }

    /// Index of the node carrying the given element id.
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.nodes.iter().find(|n| n.id == id).map(|n| n.index)
    }

    /// True if an edge joins `a` and `b`, in either direction.
    pub fn contains_edge(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.edges.iter().any(|e| e.connects(a, b))
    }

    /// Neighbours of `index` in edge order.
    pub fn neighbors(&self, index: NodeIndex) -> Vec<NodeIndex> {
        self.edges.iter().filter_map(|e| e.other_node(index)).collect()
    }

    pub fn degree(&self, index: NodeIndex) -> usize {
        self.edges.iter().filter(|e| e.other_node(index).is_some()).count()
    }

    /// Edge list in coordinate form: `(src, dst)`.
    ///
    /// With `symmetric`, every non-loop edge is also emitted reversed,
    /// which is what message-passing libraries expect for undirected graphs.
    pub fn edge_index(&self, symmetric: bool) -> (Vec<usize>, Vec<usize>) {
        let mut src = Vec::with_capacity(self.edges.len() * 2);
        let mut dst = Vec::with_capacity(self.edges.len() * 2);
        for e in &self.edges {
            src.push(e.src.0);
            dst.push(e.dst.0);
        }
        if symmetric {
            for e in self.edges.iter().filter(|e| !e.is_self_loop()) {
                src.push(e.dst.0);
                dst.push(e.src.0);
            }
        }
        (src, dst)
    }

    /// Widest feature vector in the graph (0 when empty).
    pub fn max_feature_width(&self) -> usize {
        self.nodes.iter().map(GraphNode::feature_width).max().unwrap_or(0)
    }
}
