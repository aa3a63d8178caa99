//! One structural element as read from its category file.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Connection references of one element. Most elements touch only a
/// handful of neighbours, so the list lives inline.
pub type Connections = SmallVec<[String; 4]>;

/// A structural element reconstructed from a labeled line stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    /// Identifier, unique within `category`.
    pub id: String,
    /// Name of the configured category the record was read from.
    pub category: String,
    /// Raw ids of the elements this one is physically connected to.
    pub connections: Connections,
    /// Category-specific numeric attributes, already cut to the working width.
    pub features: Vec<f64>,
}

impl ElementRecord {
    pub fn new(id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            connections: Connections::new(),
            features: Vec::new(),
        }
    }

    pub fn with_connections(mut self, refs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.connections = refs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_features(mut self, features: impl IntoIterator<Item = f64>) -> Self {
        self.features = features.into_iter().collect();
        self
    }

    pub fn references(&self, id: &str) -> bool {
        self.connections.iter().any(|c| c == id)
    }
}
