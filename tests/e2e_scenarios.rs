//! End-to-end scenarios: category files on disk → GraphBuilder → ElementGraph.
//!
//! Each test writes small export files into a temp directory, adds them in
//! a fixed category order and checks the assembled node/edge tables.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use structgraph::{
    AssemblyConfig, Error, GraphBuilder, GraphEdge, NodeIndex, Schema, SelfLoopPolicy,
};

// ============================================================================
// Helpers
// ============================================================================

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn builder(config: AssemblyConfig) -> GraphBuilder {
    GraphBuilder::new(Schema::default(), config)
}

// ============================================================================
// Reciprocal connections collapse into one edge
// ============================================================================

#[test]
fn test_reciprocal_connection_single_edge() {
    let dir = tempfile::tempdir().unwrap();
    let beams = write(dir.path(), "BeamsData.csv", "\
Beam ID,B1
Beam Connections,C1
Length,1
Width,2
Height,3
Volume,4
");
    let columns = write(dir.path(), "ColumnsData.csv", "\
Column ID,C1
Column Connections,B1
Length,5
Width,6
Height,7
Volume,8
");

    let mut b = builder(AssemblyConfig::default());
    assert_eq!(b.add_file(&beams).unwrap(), 1);
    assert_eq!(b.add_file(&columns).unwrap(), 1);
    let graph = b.finish().unwrap();

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.nodes[0].id, "B1");
    assert_eq!(graph.nodes[0].features, vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(graph.nodes[1].id, "C1");
    assert_eq!(graph.nodes[1].features, vec![5.0, 6.0, 7.0, 8.0]);
    assert_eq!(graph.edges, vec![GraphEdge::new(0, 1)]);
}

// ============================================================================
// Unknown reference aborts the run
// ============================================================================

#[test]
fn test_unknown_reference_fails() {
    let dir = tempfile::tempdir().unwrap();
    let beams = write(dir.path(), "BeamsData.csv", "\
Beam ID,B1
Beam Connections,C99
Length,1
Width,2
Height,3
Volume,4
");

    let mut b = builder(AssemblyConfig::default());
    b.add_file(&beams).unwrap();
    match b.finish() {
        Err(Error::UnresolvedReferenceError { element, reference }) => {
            assert_eq!(element, "B1");
            assert_eq!(reference, "C99");
        }
        other => panic!("expected UnresolvedReferenceError, got {other:?}"),
    }
}

// ============================================================================
// Feature count not a multiple of F
// ============================================================================

#[test]
fn test_six_feature_lines_for_width_four_fails() {
    let dir = tempfile::tempdir().unwrap();
    let beams = write(dir.path(), "BeamsData.csv", "\
Beam ID,B1
Beam Connections
Length,1
Width,2
Height,3
Volume,4
Mass,5
Grade,6
");

    let mut b = builder(AssemblyConfig::default());
    let err = b.add_file(&beams).unwrap_err();
    assert!(matches!(err, Error::ParseError { .. }), "got {err:?}");
    assert!(b.is_empty(), "failed category must not leave records behind");
}

// ============================================================================
// Self reference, under every policy
// ============================================================================

const SELF_REF_WALLS: &str = "\
Wall ID,W1
Wall Connections,W1,W2
Length,1
Width,2
Height,3
Volume,4
Wall ID,W2
Wall Connections,W1
Length,5
Width,6
Height,7
Volume,8
";

fn self_ref_graph(policy: SelfLoopPolicy) -> structgraph::Result<structgraph::ElementGraph> {
    let dir = tempfile::tempdir().unwrap();
    let walls = write(dir.path(), "WallsData.csv", SELF_REF_WALLS);
    let mut b = builder(AssemblyConfig::default().with_self_loops(policy));
    b.add_file(&walls)?;
    b.finish()
}

#[test]
fn test_self_reference_dropped_by_default() {
    let graph = self_ref_graph(SelfLoopPolicy::default()).unwrap();
    assert_eq!(graph.edges, vec![GraphEdge::new(0, 1)]);
    assert!(graph.edges.iter().all(|e| !e.is_self_loop()));
}

#[test]
fn test_self_reference_kept() {
    let graph = self_ref_graph(SelfLoopPolicy::Keep).unwrap();
    assert_eq!(graph.edges, vec![GraphEdge::new(0, 0), GraphEdge::new(0, 1)]);
}

#[test]
fn test_self_reference_rejected() {
    let err = self_ref_graph(SelfLoopPolicy::Reject).unwrap_err();
    assert!(matches!(err, Error::SelfLoopError(ref id) if id == "W1"), "got {err:?}");
}

// ============================================================================
// Category inference and cross-category ids
// ============================================================================

#[test]
fn test_unrecognised_file_name_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "FootingsData.csv", "Footing ID,F1\n");
    let err = builder(AssemblyConfig::default()).add_file(&path).unwrap_err();
    assert!(matches!(err, Error::ParseError { line: None, .. }), "got {err:?}");
}

#[test]
fn test_same_id_in_two_categories_fails() {
    let dir = tempfile::tempdir().unwrap();
    let beams = write(dir.path(), "BeamsData.csv", "Beam ID,E1\nBeam Connections\nA,1\nB,2\nC,3\nD,4\n");
    let walls = write(dir.path(), "WallsData.csv", "Wall ID,E1\nWall Connections\nA,1\nB,2\nC,3\nD,4\n");

    let mut b = builder(AssemblyConfig::default());
    b.add_file(&beams).unwrap();
    b.add_file(&walls).unwrap();
    assert!(matches!(b.finish(), Err(Error::DuplicateIdError { .. })));
}

// ============================================================================
// Mixed widths and truncation
// ============================================================================

#[test]
fn test_slab_truncated_to_working_width() {
    let dir = tempfile::tempdir().unwrap();
    let slabs = write(dir.path(), "SlabsData.csv", "\
Slab ID,S1
Slab Connections
Length,8
Width,4
Thickness,0.2
Area,32
Volume,6.4
");
    let beams = write(dir.path(), "BeamsData.csv", "\
Beam ID,B1
Beam Connections,S1
Length,6
Width,0.3
Height,0.5
Volume,0.9
");

    let mut native = builder(AssemblyConfig::default());
    native.add_file(&beams).unwrap();
    native.add_file(&slabs).unwrap();
    let graph = native.finish().unwrap();
    assert_eq!(graph.nodes[1].features.len(), 5);

    let mut cut = builder(AssemblyConfig::default().with_feature_width(4));
    cut.add_file(&beams).unwrap();
    cut.add_file(&slabs).unwrap();
    let graph = cut.finish().unwrap();
    assert_eq!(graph.nodes[1].features, vec![8.0, 4.0, 0.2, 32.0]);
    assert!(graph.nodes.iter().all(|n| n.features.len() == 4));
    assert_eq!(graph.index_of("S1"), Some(NodeIndex(1)));
    assert_eq!(graph.neighbors(NodeIndex(1)), vec![NodeIndex(0)]);
}
