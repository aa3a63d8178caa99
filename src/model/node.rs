//! Node in the assembled element graph.

use serde::{Deserialize, Serialize};

/// Position of a node in the global ordering (`0..N`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeIndex(pub usize);

impl std::fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node of the element graph: one element, renumbered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub index: NodeIndex,
    /// Original element id from the source file.
    pub id: String,
    pub category: String,
    pub features: Vec<f64>,
}

impl GraphNode {
    pub fn new(index: NodeIndex, id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            index,
            id: id.into(),
            category: category.into(),
            features: Vec::new(),
        }
    }

    pub fn with_features(mut self, features: impl IntoIterator<Item = f64>) -> Self {
        self.features = features.into_iter().collect();
        self
    }

    pub fn feature_width(&self) -> usize {
        self.features.len()
    }
}
