//! Table export — write an assembled graph as node/edge CSV tables or JSON.
//!
//! ```text
//! ElementGraph → write_node_table() → Node ID,Element ID,Dim 1,...
//!              → write_edge_table() → Src ID,Dst ID
//!              → write_json()       → {"nodes": [...], "edges": [...]}
//! ```
//!
//! Nothing is written until the graph has been fully assembled, so a
//! failed run never leaves half a table behind.
//!
//! Feature cells hold the parsed `f64`, written in its shortest
//! round-trip decimal form, not the text of the source cell: `6.0` is
//! written as `6` and `1e-7` as `0.0000001`. Reading a cell back always
//! yields the same value.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

use crate::config::TableConfig;
use crate::model::*;
use crate::Result;

/// Write the node table: one row per node, features padded to the widest node.
pub fn write_node_table(
    graph: &ElementGraph,
    tables: &TableConfig,
    writer: &mut dyn Write,
) -> Result<()> {
    let width = graph.max_feature_width();

    let mut header = vec![
        escape_cell(&tables.node_id_header).into_owned(),
        escape_cell(&tables.element_id_header).into_owned(),
    ];
    header.extend((0..width).map(|i| escape_cell(&tables.feature_header(i)).into_owned()));
    writeln!(writer, "{}", header.join(","))?;

    for node in &graph.nodes {
        let mut row = vec![node.index.to_string(), escape_cell(&node.id).into_owned()];
        row.extend(node.features.iter().map(|f| f.to_string()));
        row.resize(width + 2, String::new());
        writeln!(writer, "{}", row.join(","))?;
    }
    Ok(())
}

/// Write the edge table: one `src,dst` row per edge.
pub fn write_edge_table(
    graph: &ElementGraph,
    tables: &TableConfig,
    writer: &mut dyn Write,
) -> Result<()> {
    writeln!(writer, "{},{}", escape_cell(&tables.src_header), escape_cell(&tables.dst_header))?;
    for edge in &graph.edges {
        writeln!(writer, "{},{}", edge.src, edge.dst)?;
    }
    Ok(())
}

/// Write the whole graph as pretty-printed JSON.
pub fn write_json(graph: &ElementGraph, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, graph)?;
    writeln!(writer)?;
    Ok(())
}

/// Read a graph previously written by `write_json`.
pub fn read_json(reader: impl Read) -> Result<ElementGraph> {
    Ok(serde_json::from_reader(reader)?)
}

/// Write the node table, the edge table and (if configured) the JSON
/// document into `dir`.
pub fn write_tables(graph: &ElementGraph, dir: &Path, tables: &TableConfig) -> Result<()> {
    let node_path = dir.join(&tables.node_file);
    let mut nodes = BufWriter::new(File::create(&node_path)?);
    write_node_table(graph, tables, &mut nodes)?;
    nodes.flush()?;

    let edge_path = dir.join(&tables.edge_file);
    let mut edges = BufWriter::new(File::create(&edge_path)?);
    write_edge_table(graph, tables, &mut edges)?;
    edges.flush()?;

    if let Some(json_file) = &tables.json_file {
        let mut json = BufWriter::new(File::create(dir.join(json_file))?);
        write_json(graph, &mut json)?;
        json.flush()?;
    }

    debug!(
        nodes = %node_path.display(),
        edges = %edge_path.display(),
        "wrote graph tables"
    );
    Ok(())
}

/// Quote a cell if it contains a separator, a quote or a line break.
fn escape_cell(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
