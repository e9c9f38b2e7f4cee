//! Property-based tests for device graph analyses.
//!
//! Random connected devices are built from a random spanning tree plus a few
//! extra weighted connections, and kept small so that the exhaustive line
//! search stays cheap.

use std::collections::BTreeSet;

use arvak_arch::{Architecture, Node, json};
use proptest::prelude::*;

/// Generate a random connected device with 2-9 nodes.
fn arb_connected_arch() -> impl Strategy<Value = Architecture> {
    (2_u32..=9).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec(any::<prop::sample::Index>(), (n - 1) as usize),
            prop::collection::vec((0..n, 0..n, 1_u32..=4), 0..=10),
        )
            .prop_map(|(n, parents, extra)| {
                let mut arch = Architecture::from_nodes((0..n).map(Node::new))
                    .expect("distinct nodes");
                for (i, parent) in parents.iter().enumerate() {
                    let child = i as u32 + 1;
                    let parent = parent.index(child as usize) as u32;
                    arch.add_connection(&Node::new(parent), &Node::new(child))
                        .expect("tree edge");
                }
                for (a, b, w) in extra {
                    if a != b {
                        arch.add_weighted_connection(&Node::new(a), &Node::new(b), f64::from(w) * 0.5)
                            .expect("extra edge");
                    }
                }
                arch
            })
    })
}

fn node_list(arch: &Architecture) -> Vec<Node> {
    arch.nodes().cloned().collect()
}

/// Cut vertices by definition: removing the node disconnects the rest.
fn brute_force_cut_vertices(arch: &Architecture) -> BTreeSet<Node> {
    let nodes = node_list(arch);
    nodes
        .iter()
        .filter(|v| {
            let rest: Vec<_> = nodes.iter().filter(|n| n != v).cloned().collect();
            let sub = arch.subarchitecture(&rest).expect("known nodes");
            sub.diameter().is_err()
        })
        .cloned()
        .collect()
}

proptest! {
    /// Distances are symmetric, zero only on the diagonal, and bounded by
    /// the diameter.
    #[test]
    fn test_distance_is_a_metric(arch in arb_connected_arch()) {
        let nodes = node_list(&arch);
        let diameter = arch.diameter().expect("connected");
        for a in &nodes {
            for b in &nodes {
                let d = arch.distance(a, b).expect("connected");
                prop_assert_eq!(d, arch.distance(b, a).expect("connected"));
                prop_assert_eq!(d == 0, a == b);
                prop_assert!(d <= diameter);
            }
        }
    }

    /// The fingerprint of a node agrees with pairwise distances to the other
    /// nodes, in node order.
    #[test]
    fn test_fingerprint_matches_distances(arch in arb_connected_arch()) {
        let nodes = node_list(&arch);
        let last = &nodes[nodes.len() - 1];
        let all = arch.all_distances(last).expect("known node");
        prop_assert_eq!(all.len(), nodes.len());

        let fingerprint = arch.fingerprint(last).expect("known node");
        prop_assert_eq!(fingerprint.len(), nodes.len() - 1);
        for (node, d) in nodes.iter().filter(|n| *n != last).zip(fingerprint) {
            prop_assert_eq!(d, Some(arch.distance(last, node).expect("connected")));
        }
    }

    /// Encoding then decoding gives back an equal device with the same order.
    #[test]
    fn test_json_roundtrip(arch in arb_connected_arch()) {
        let text = json::to_json_string(&arch, false).expect("encode");
        let back = json::from_json_str(&text).expect("decode");
        prop_assert!(back.nodes().eq(arch.nodes()));
        prop_assert_eq!(back, arch);
    }

    /// A sub-architecture keeps exactly the connections among its nodes.
    #[test]
    fn test_subarchitecture_closure(
        arch in arb_connected_arch(),
        mask in prop::collection::vec(any::<bool>(), 9),
    ) {
        let nodes = node_list(&arch);
        let kept: Vec<_> = nodes
            .iter()
            .zip(&mask)
            .filter(|&(_, keep)| *keep)
            .map(|(n, _)| n.clone())
            .collect();
        let sub = arch.subarchitecture(&kept).expect("known nodes");

        prop_assert_eq!(sub.n_nodes(), kept.len());
        for (a, b) in arch.connections() {
            let inside = kept.contains(&a) && kept.contains(&b);
            prop_assert_eq!(sub.has_connection(&a, &b), inside);
        }
    }

    /// Tarjan's cut vertices match removal-based cut vertices, and the
    /// relative analysis on the full device agrees with both.
    #[test]
    fn test_articulation_points_match_definition(arch in arb_connected_arch()) {
        let aps = arch.articulation_points();
        prop_assert_eq!(&aps, &brute_force_cut_vertices(&arch));
        prop_assert_eq!(arch.subgraph_articulation_points(&arch).expect("same nodes"), aps);
    }

    /// Lines are disjoint simple paths of the requested sizes, longest first.
    #[test]
    fn test_lines_are_disjoint_paths(
        arch in arb_connected_arch(),
        requested in prop::collection::vec(1_usize..=4, 1..=3),
    ) {
        let mut budget = arch.n_nodes();
        let requested: Vec<_> = requested
            .into_iter()
            .take_while(|&len| {
                let fits = len <= budget;
                budget = budget.saturating_sub(len);
                fits
            })
            .collect();

        let lines = arch.lines(&requested).expect("fits in device");
        prop_assert!(lines.len() <= requested.len());
        prop_assert!(lines.windows(2).all(|w| w[0].len() >= w[1].len()));

        let mut seen = BTreeSet::new();
        for line in &lines {
            prop_assert!(requested.contains(&line.len()));
            for pair in line.windows(2) {
                prop_assert!(arch.connection_exists(&pair[0], &pair[1]));
            }
            for node in line {
                prop_assert!(seen.insert(node.clone()), "node {} reused", node);
            }
        }
    }

    /// Pruning one node at a time never removes a cut vertex and never
    /// disconnects the device.
    #[test]
    fn test_pruning_keeps_device_connected(arch in arb_connected_arch(), steps in 1_usize..=5) {
        let mut arch = arch;
        for _ in 0..steps {
            let before = arch.articulation_points();
            let n_before = arch.n_nodes();
            let removed = arch.remove_worst_nodes(1);

            prop_assert!(removed.len() <= 1);
            prop_assert_eq!(arch.n_nodes(), n_before - removed.len());
            for node in &removed {
                prop_assert!(!before.contains(node));
            }
            if !arch.is_empty() {
                prop_assert!(arch.diameter().is_ok());
            }
        }
    }
}
