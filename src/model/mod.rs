//! # Element Graph Model
//!
//! DTOs shared by the extractor, the assembler and the exporters.
//!
//! Design rule: this module is pure data — no I/O, no parsing, no logging.

pub mod element;
pub mod node;
pub mod edge;
pub mod graph;

pub use element::{ElementRecord, Connections};
pub use node::{GraphNode, NodeIndex};
pub use edge::GraphEdge;
pub use graph::ElementGraph;
