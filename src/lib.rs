//! # structgraph — Structural Element Tables → Homogeneous Graph
//!
//! Converts per-category structural export files (beams, columns, slabs,
//! walls, …) into one node table and one deduplicated, undirected edge
//! table, ready to feed a graph-learning pipeline.
//!
//! ## Design Principles
//!
//! 1. **Counting is checked**: the extractor closes a record every `F`
//!    feature lines and fails fast when a boundary does not line up
//! 2. **Clean DTOs**: `ElementRecord`, `GraphNode`, `GraphEdge` cross all boundaries
//! 3. **Build once, write once**: nothing is mutated after assembly
//! 4. **Schema is config**: category widths and labels come from `Schema`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use structgraph::{GraphBuilder, Schema, AssemblyConfig};
//!
//! # fn example() -> structgraph::Result<()> {
//! let schema = Schema::default();
//! let mut builder = GraphBuilder::new(schema, AssemblyConfig::default());
//!
//! builder.add_file("Project 001/BeamsData.csv")?;
//! builder.add_file("Project 001/ColumnsData.csv")?;
//!
//! let graph = builder.finish()?;
//! println!("{} nodes, {} edges", graph.node_count(), graph.edge_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Record extraction | `extract` | `Extraction` (parallel ids / connections / features) |
//! | Graph assembly | `assemble` | `ElementGraph` |
//! | Table export | `export` | `Nodes.csv`, `Edges.csv`, JSON |
//! | Project runs | `pipeline` | one graph per `Project NNN` directory |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod config;
pub mod extract;
pub mod assemble;
pub mod export;
pub mod pipeline;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{
    ElementRecord, ElementGraph, GraphNode, GraphEdge, NodeIndex, Connections,
};
pub use config::{
    Schema, CategorySpec, AssemblyConfig, SelfLoopPolicy, PipelineConfig, TableConfig,
};
pub use extract::{Extraction, extract_file, extract_reader};
pub use assemble::assemble;

use std::path::Path;

// ============================================================================
// Top-level builder
// ============================================================================

/// Collects records category by category, then assembles them.
///
/// Node indices follow the order in which files are added, so callers
/// that need reproducible graphs must add categories in a fixed order.
pub struct GraphBuilder {
    schema: Schema,
    config: AssemblyConfig,
    records: Vec<ElementRecord>,
}

impl GraphBuilder {
    pub fn new(schema: Schema, config: AssemblyConfig) -> Self {
        Self { schema, config, records: Vec::new() }
    }

    /// Extract one category file and append its records.
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let extraction = extract_file(path.as_ref(), &self.schema, self.config.feature_width)?;
        self.add_extraction(extraction)
    }

    /// Append an already-extracted category. Returns the number of records added.
    pub fn add_extraction(&mut self, extraction: Extraction) -> Result<usize> {
        let records = extraction.into_records()?;
        let added = records.len();
        self.records.extend(records);
        Ok(added)
    }

    /// Number of records collected so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Assemble every collected record into the final graph.
    pub fn finish(self) -> Result<ElementGraph> {
        assemble(self.records, &self.config)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `line` is `None` when the whole file is rejected (e.g. unknown category).
    #[error("Parse error in {source_name}{}: {message}", at_line(.line))]
    ParseError { source_name: String, line: Option<usize>, message: String },

    #[error("Alignment error in {source_name}: {message}")]
    ParseAlignmentError { source_name: String, message: String },

    #[error("Unresolved reference: element '{element}' connects to unknown id '{reference}'")]
    UnresolvedReferenceError { element: String, reference: String },

    #[error("Duplicate element id '{id}' in categories {first} and {second}")]
    DuplicateIdError { id: String, first: String, second: String },

    #[error("Self-loop rejected: element '{0}' references itself")]
    SelfLoopError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn at_line(line: &Option<usize>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, Error>;
