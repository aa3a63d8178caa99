//! Property tests for the extraction and assembly invariants.

use std::collections::HashSet;

use proptest::prelude::*;
use structgraph::{
    assemble, extract_reader, AssemblyConfig, CategorySpec, ElementRecord, SelfLoopPolicy,
};

/// Random records `E0..En` whose connections point at other records by index.
fn records_strategy() -> impl Strategy<Value = Vec<ElementRecord>> {
    (1usize..24).prop_flat_map(|n| {
        prop::collection::vec(
            (
                prop::collection::vec(0..n, 0..6),
                prop::collection::vec(-1.0e3f64..1.0e3, 4),
            ),
            n,
        )
    })
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (refs, features))| {
                ElementRecord::new(format!("E{i}"), "Beam")
                    .with_connections(refs.into_iter().map(|r| format!("E{r}")))
                    .with_features(features)
            })
            .collect()
    })
}

/// Render records as a beam export file.
fn render(records: &[ElementRecord]) -> String {
    let mut out = String::new();
    for rec in records {
        out.push_str(&format!("Beam ID,{}\n", rec.id));
        out.push_str("Beam Connections");
        for c in &rec.connections {
            out.push(',');
            out.push_str(c);
        }
        out.push('\n');
        for (i, f) in rec.features.iter().enumerate() {
            out.push_str(&format!("Feature {i},{f}\n"));
        }
    }
    out
}

proptest! {
    #[test]
    fn prop_extraction_aligned_and_width_bounded(records in records_strategy(), width in 1usize..=4) {
        let text = render(&records);
        let out = extract_reader(text.as_bytes(), &CategorySpec::new("Beam", 4), "prop", Some(width)).unwrap();

        prop_assert_eq!(out.ids.len(), records.len());
        prop_assert_eq!(out.connections.len(), records.len());
        prop_assert_eq!(out.features.len(), records.len());
        for (vector, rec) in out.features.iter().zip(&records) {
            prop_assert_eq!(vector.as_slice(), &rec.features[..width]);
        }
    }

    #[test]
    fn prop_indices_are_a_permutation(records in records_strategy()) {
        let n = records.len();
        let graph = assemble(records, &AssemblyConfig::default()).unwrap();
        let indices: Vec<usize> = graph.nodes.iter().map(|node| node.index.0).collect();
        prop_assert_eq!(indices, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn prop_no_duplicate_unordered_pairs(records in records_strategy()) {
        let graph = assemble(records, &AssemblyConfig::default().with_self_loops(SelfLoopPolicy::Keep)).unwrap();
        let mut seen = HashSet::new();
        for edge in &graph.edges {
            prop_assert!(seen.insert(edge.canonical()), "duplicate edge {:?}", edge);
        }
    }

    #[test]
    fn prop_every_reference_is_covered(records in records_strategy()) {
        let graph = assemble(records.clone(), &AssemblyConfig::default()).unwrap();
        for (i, rec) in records.iter().enumerate() {
            for reference in &rec.connections {
                let j = graph.index_of(reference).unwrap();
                if j.0 == i {
                    continue;
                }
                prop_assert!(graph.contains_edge(graph.nodes[i].index, j));
            }
        }
        prop_assert!(graph.edges.iter().all(|e| !e.is_self_loop()));
    }

    #[test]
    fn prop_assembly_is_deterministic(records in records_strategy()) {
        let first = assemble(records.clone(), &AssemblyConfig::default()).unwrap();
        let second = assemble(records, &AssemblyConfig::default()).unwrap();
        prop_assert_eq!(first.edges, second.edges);
    }
}
