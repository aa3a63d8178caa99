//! Graph assembly — renumber elements and turn connection references
//! into a deduplicated, undirected edge list.
//!
//! ```text
//! [ElementRecord; N] (concatenated in category order)
//!   → id index   (id → NodeIndex, duplicates rejected)
//!   → edges      (one pass over connections, canonical-pair dedup)
//!   → ElementGraph
//! ```
//!
//! Edge order is the order in which `(element, reference)` pairs are met
//! during the pass, so a fixed input always yields the same edge list.

use hashbrown::hash_map::Entry;
use hashbrown::{HashMap, HashSet};
use tracing::{info, warn};

use crate::config::{AssemblyConfig, SelfLoopPolicy};
use crate::model::*;
use crate::{Error, Result};

/// Assemble concatenated records into the node and edge tables.
///
/// Node `i` is `records[i]`. Fails on duplicate ids, unresolved references,
/// feature vectors narrower than the working width, and (under
/// `SelfLoopPolicy::Reject`) self references.
pub fn assemble(records: Vec<ElementRecord>, config: &AssemblyConfig) -> Result<ElementGraph> {
    let edges = {
        let index = id_index(&records)?;
        connections_to_edges(&records, &index, config.self_loops)?
    };

    let mut nodes = Vec::with_capacity(records.len());
    for (i, rec) in records.into_iter().enumerate() {
        let mut features = rec.features;
        if let Some(width) = config.feature_width {
            if features.len() < width {
                return Err(Error::ConfigError(format!(
                    "element '{}' has {} features, fewer than the working width {width}",
                    rec.id,
                    features.len(),
                )));
            }
            features.truncate(width);
        }
        nodes.push(GraphNode {
            index: NodeIndex(i),
            id: rec.id,
            category: rec.category,
            features,
        });
    }

    info!(nodes = nodes.len(), edges = edges.len(), "assembled element graph");
    Ok(ElementGraph::new(nodes, edges))
}

/// Map every element id to its node index.
///
/// Ids must be unique across all categories; a repeated id would silently
/// merge two distinct elements, so it is an error.
pub fn id_index(records: &[ElementRecord]) -> Result<HashMap<&str, NodeIndex>> {
    let mut index = HashMap::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        match index.entry(rec.id.as_str()) {
            Entry::Occupied(prev) => {
                let prev: &NodeIndex = prev.get();
                return Err(Error::DuplicateIdError {
                    id: rec.id.clone(),
                    first: records[prev.0].category.clone(),
                    second: rec.category.clone(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(NodeIndex(i));
            }
        }
    }
    Ok(index)
}

/// Resolve every connection reference and collect unique undirected edges.
pub fn connections_to_edges(
    records: &[ElementRecord],
    index: &HashMap<&str, NodeIndex>,
    self_loops: SelfLoopPolicy,
) -> Result<Vec<GraphEdge>> {
    let mut seen: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();
    let mut edges = Vec::new();
    let mut dropped = 0usize;

    for (i, rec) in records.iter().enumerate() {
        let src = NodeIndex(i);
        for reference in &rec.connections {
            let dst = *index.get(reference.as_str()).ok_or_else(|| Error::UnresolvedReferenceError {
                element: rec.id.clone(),
                reference: reference.clone(),
            })?;

            if src == dst {
                match self_loops {
                    SelfLoopPolicy::Drop => {
                        dropped += 1;
                        continue;
                    }
                    SelfLoopPolicy::Keep => {}
                    SelfLoopPolicy::Reject => return Err(Error::SelfLoopError(rec.id.clone())),
                }
            }

            let edge = GraphEdge { src, dst };
            if seen.insert(edge.canonical()) {
                edges.push(edge);
            }
        }
    }

    if dropped > 0 {
        warn!(count = dropped, "dropped self-referencing connections");
    }
    Ok(edges)
}
