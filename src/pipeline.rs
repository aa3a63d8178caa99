//! Project pipeline — one graph per project directory.
//!
//! A data directory holds numbered project folders, each with one export
//! file per category:
//!
//! ```text
//! Dynamo/
//!   Project 001/
//!     BeamsData.csv  ColumnsData.csv  SlabsData.csv  WallsData.csv
//!     Nodes.csv  Edges.csv            <- written by `run_project`
//!   Project 002/
//!     ...
//! ```
//!
//! Categories are read in schema order, so node indices are reproducible.
//! Any failure aborts the project before its tables are written.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{AssemblyConfig, PipelineConfig, Schema};
use crate::extract::extract_reader;
use crate::export::write_tables;
use crate::model::ElementGraph;
use crate::{GraphBuilder, Result};

/// Outcome of one processed project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub project: usize,
    pub dir: PathBuf,
    pub nodes: usize,
    pub edges: usize,
}

/// Extract every category file of `project_dir` and assemble the graph.
pub fn build_project(
    project_dir: &Path,
    schema: &Schema,
    assembly: &AssemblyConfig,
) -> Result<ElementGraph> {
    let mut builder = GraphBuilder::new(schema.clone(), assembly.clone());

    for category in &schema.categories {
        let path = project_dir.join(&*category.file_name());
        let source_name = path.display().to_string();
        let file = File::open(&path)?;
        let extraction = extract_reader(
            BufReader::new(file),
            category,
            &source_name,
            assembly.feature_width,
        )?;
        let added = builder.add_extraction(extraction)?;
        debug!(category = %category.name, records = added, "collected category");
    }

    builder.finish()
}

/// Build project `n` and write its tables into the project directory.
pub fn run_project(config: &PipelineConfig, n: usize) -> Result<ProjectSummary> {
    let dir = config.project_dir(n);
    let graph = build_project(&dir, &config.schema, &config.assembly)?;
    write_tables(&graph, &dir, &config.tables)?;

    info!(
        project = n,
        dir = %dir.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "project graph written"
    );
    Ok(ProjectSummary {
        project: n,
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        dir,
    })
}

/// Process projects `1..=project_count`, stopping at the first failure.
pub fn run(config: &PipelineConfig) -> Result<Vec<ProjectSummary>> {
    config.validate()?;
    (1..=config.project_count)
        .map(|n| run_project(config, n))
        .collect()
}
