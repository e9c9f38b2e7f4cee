//! Articulation-point (cut vertex) analysis.

use std::collections::BTreeSet;
use std::collections::hash_map::Entry;
use std::collections::VecDeque;

use petgraph::graph::{NodeIndex, UnGraph};
use rustc_hash::FxHashMap;

use crate::architecture::Architecture;
use crate::error::ArchResult;
use crate::node::Node;

const UNVISITED: usize = usize::MAX;

/// Cut vertices of an undirected graph (Tarjan's low-link algorithm).
///
/// Iterative, so deep chains cannot overflow the stack.
pub(crate) fn cut_vertices<N, E>(graph: &UnGraph<N, E>) -> Vec<NodeIndex> {
    let n = graph.node_count();
    let mut disc = vec![UNVISITED; n];
    let mut low = vec![0; n];
    let mut parent: Vec<Option<NodeIndex>> = vec![None; n];
    let mut is_cut = vec![false; n];
    let mut time = 0;

    for root in graph.node_indices() {
        if disc[root.index()] != UNVISITED {
            continue;
        }
        disc[root.index()] = time;
        low[root.index()] = time;
        time += 1;

        let mut root_children = 0;
        let mut stack = vec![(root, graph.neighbors(root))];

        loop {
            let Some(top) = stack.last_mut() else {
                break;
            };
            let v = top.0;
            let next = top.1.next();

            match next {
                Some(w) if disc[w.index()] == UNVISITED => {
                    disc[w.index()] = time;
                    low[w.index()] = time;
                    time += 1;
                    parent[w.index()] = Some(v);
                    if v == root {
                        root_children += 1;
                    }
                    stack.push((w, graph.neighbors(w)));
                }
                Some(w) => {
                    if parent[v.index()] != Some(w) {
                        low[v.index()] = low[v.index()].min(disc[w.index()]);
                    }
                }
                None => {
                    stack.pop();
                    if let Some(&(p, _)) = stack.last() {
                        low[p.index()] = low[p.index()].min(low[v.index()]);
                        if p != root && low[v.index()] >= disc[p.index()] {
                            is_cut[p.index()] = true;
                        }
                    }
                }
            }
        }

        if root_children > 1 {
            is_cut[root.index()] = true;
        }
    }

    graph.node_indices().filter(|v| is_cut[v.index()]).collect()
}

/// Connected-component label of every node, ignoring `removed`.
fn component_labels<N, E>(graph: &UnGraph<N, E>, removed: Option<usize>) -> Vec<usize> {
    let mut label = vec![UNVISITED; graph.node_count()];
    let mut next = 0;
    for start in graph.node_indices() {
        if label[start.index()] != UNVISITED || Some(start.index()) == removed {
            continue;
        }
        label[start.index()] = next;
        let mut queue = VecDeque::from([start]);
        while let Some(v) = queue.pop_front() {
            for w in graph.neighbors(v) {
                if label[w.index()] == UNVISITED && Some(w.index()) != removed {
                    label[w.index()] = next;
                    queue.push_back(w);
                }
            }
        }
        next += 1;
    }
    label
}

impl Architecture {
    /// Nodes whose removal increases the number of connected components.
    pub fn articulation_points(&self) -> BTreeSet<Node> {
        let graph = self.undirected();
        cut_vertices(&graph)
            .into_iter()
            .map(|v| graph[v].clone())
            .collect()
    }

    /// Articulation points of `sub` as it sits inside this architecture.
    ///
    /// A node of `sub` is reported when removing it from this (full) device
    /// separates two other nodes of `sub` that were connected before. Paths
    /// through nodes outside `sub` count, so a node that is isolated within
    /// `sub` can still be critical, and a cut vertex of `sub` alone may be
    /// bypassed by the rest of the device.
    ///
    /// Every node of `sub` must be a node of `self`.
    pub fn subgraph_articulation_points(&self, sub: &Architecture) -> ArchResult<BTreeSet<Node>> {
        let graph = self.undirected();
        let members = sub
            .nodes()
            .map(|n| self.position(n))
            .collect::<ArchResult<Vec<_>>>()?;

        let before = component_labels(&graph, None);
        let mut out = BTreeSet::new();

        for &v in &members {
            let after = component_labels(&graph, Some(v));
            let mut seen: FxHashMap<usize, usize> = FxHashMap::default();
            for &u in &members {
                if u == v {
                    continue;
                }
                match seen.entry(before[u]) {
                    Entry::Vacant(e) => {
                        e.insert(after[u]);
                    }
                    Entry::Occupied(e) => {
                        if *e.get() != after[u] {
                            out.insert(graph[NodeIndex::new(v)].clone());
                            break;
                        }
                    }
                }
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(n: u32) -> Architecture {
        Architecture::from_connections((0..n - 1).map(|i| (Node::new(i), Node::new(i + 1)))).unwrap()
    }

    fn ring(n: u32) -> Architecture {
        Architecture::from_connections((0..n).map(|i| (Node::new(i), Node::new((i + 1) % n)))).unwrap()
    }

    #[test]
    fn test_path_articulation_points() {
        let aps = path(5).articulation_points();
        assert_eq!(aps, (1..4).map(Node::new).collect::<BTreeSet<_>>());
    }

    #[test]
    fn test_ring_has_no_articulation_points() {
        assert!(ring(3).articulation_points().is_empty());
        assert!(ring(8).articulation_points().is_empty());
    }

    #[test]
    fn test_bowtie_center() {
        // Two triangles sharing node 2.
        let arch = Architecture::from_connections([
            (Node::new(0), Node::new(1)),
            (Node::new(1), Node::new(2)),
            (Node::new(2), Node::new(0)),
            (Node::new(2), Node::new(3)),
            (Node::new(3), Node::new(4)),
            (Node::new(4), Node::new(2)),
        ])
        .unwrap();
        assert_eq!(arch.articulation_points(), BTreeSet::from([Node::new(2)]));
    }

    #[test]
    fn test_disconnected_components() {
        let mut arch = path(3);
        arch.add_node(Node::new(10)).unwrap();
        arch.add_node(Node::new(11)).unwrap();
        arch.add_connection(&Node::new(10), &Node::new(11)).unwrap();
        assert_eq!(arch.articulation_points(), BTreeSet::from([Node::new(1)]));
    }

    #[test]
    fn test_subgraph_aps_through_full_device() {
        let arch = path(5);
        // No induced connections, but 0, 2 and 4 only meet through node 2.
        let sub = arch
            .subarchitecture(&[Node::new(0), Node::new(2), Node::new(4)])
            .unwrap();
        assert_eq!(sub.n_connections(), 0);
        assert_eq!(
            arch.subgraph_articulation_points(&sub).unwrap(),
            BTreeSet::from([Node::new(2)])
        );
    }

    #[test]
    fn test_subgraph_aps_prefix() {
        let arch = path(5);
        let sub = arch
            .subarchitecture(&[Node::new(0), Node::new(1), Node::new(2)])
            .unwrap();
        assert_eq!(
            arch.subgraph_articulation_points(&sub).unwrap(),
            BTreeSet::from([Node::new(1)])
        );
    }

    #[test]
    fn test_subgraph_aps_bypassed_in_ring() {
        let arch = ring(6);
        let sub = arch
            .subarchitecture(&[Node::new(0), Node::new(1), Node::new(2)])
            .unwrap();
        assert!(sub.articulation_points().contains(&Node::new(1)));
        assert!(arch.subgraph_articulation_points(&sub).unwrap().is_empty());
    }

    #[test]
    fn test_subgraph_unknown_node() {
        let arch = path(3);
        let other = Architecture::from_nodes([Node::new(42)]).unwrap();
        assert!(arch.subgraph_articulation_points(&other).is_err());
    }
}
