//! Decomposition of a device into disjoint lines.
//!
//! A line is a simple path of an exact number of nodes. Routing for
//! nearest-neighbour circuits places logical qubit chains onto such lines.

use petgraph::graph::{NodeIndex, UnGraph};
use tracing::{debug, instrument};

use crate::architecture::Architecture;
use crate::error::{ArchError, ArchResult};
use crate::node::Node;

impl Architecture {
    /// Extract disjoint lines with the requested numbers of nodes.
    ///
    /// Lengths are processed longest first. For each length, one longest
    /// simple path (searched up to that length) is taken from the remaining
    /// graph and truncated to exactly the requested size; the edges of its
    /// nodes are then cleared so no later line can reuse them.
    ///
    /// A length that cannot be satisfied is skipped, so the result may hold
    /// fewer lines than requested. Lines are returned in processing order.
    ///
    /// Fails with [`ArchError::InsufficientNodes`] before any search when
    /// the lengths add up to more than the number of nodes.
    #[instrument(skip(self), fields(nodes = self.n_nodes()))]
    pub fn lines(&self, required_lengths: &[usize]) -> ArchResult<Vec<Vec<Node>>> {
        let required: usize = required_lengths.iter().sum();
        if required > self.n_nodes() {
            return Err(ArchError::InsufficientNodes {
                required,
                available: self.n_nodes(),
            });
        }

        let mut lengths = required_lengths.to_vec();
        lengths.sort_unstable_by(|a, b| b.cmp(a));

        let mut graph = self.undirected();
        let mut consumed = vec![false; graph.node_count()];
        let mut lines = Vec::with_capacity(lengths.len());

        for length in lengths {
            let mut longest = longest_simple_path(&graph, &consumed, length);
            if longest.len() < length {
                debug!(length, found = longest.len(), "skipping unattainable line length");
                continue;
            }
            longest.truncate(length);

            for v in &longest {
                consumed[v.index()] = true;
            }
            graph.retain_edges(|g, e| {
                g.edge_endpoints(e)
                    .is_some_and(|(a, b)| !consumed[a.index()] && !consumed[b.index()])
            });

            lines.push(longest.iter().map(|&v| graph[v].clone()).collect());
        }

        Ok(lines)
    }
}

/// Depth-first search for a longest simple path, stopping early once a path
/// of `cutoff` nodes is found. Nodes marked in `blocked` are never visited.
fn longest_simple_path<N>(
    graph: &UnGraph<N, ()>,
    blocked: &[bool],
    cutoff: usize,
) -> Vec<NodeIndex> {
    let available = blocked.iter().filter(|b| !**b).count();
    let cutoff = cutoff.min(available);
    let mut best = Vec::new();
    if cutoff == 0 {
        return best;
    }

    let mut search = PathSearch {
        graph,
        on_path: blocked.to_vec(),
        path: Vec::with_capacity(cutoff),
        cutoff,
    };
    for start in graph.node_indices() {
        if blocked[start.index()] {
            continue;
        }
        if search.extend(start, &mut best) {
            break;
        }
    }
    best
}

struct PathSearch<'g, N> {
    graph: &'g UnGraph<N, ()>,
    on_path: Vec<bool>,
    path: Vec<NodeIndex>,
    cutoff: usize,
}

impl<'g, N> PathSearch<'g, N> {
    /// Walk the simple paths starting at `start` with an explicit stack of
    /// neighbour iterators, one per path node. Returns `true` once `best`
    /// has reached the cutoff.
    ///
    /// `best` is refreshed when the search backs out of a node or reaches
    /// the cutoff.
    fn extend(&mut self, start: NodeIndex, best: &mut Vec<NodeIndex>) -> bool {
        let graph: &'g UnGraph<N, ()> = self.graph;
        self.enter(start);
        let mut stack = vec![graph.neighbors(start)];

        while let Some(neighbors) = stack.last_mut() {
            if self.path.len() >= self.cutoff {
                best.clone_from(&self.path);
                while !self.path.is_empty() {
                    self.leave();
                }
                return true;
            }

            let on_path = &self.on_path;
            let next = neighbors.find(|n| !on_path[n.index()]);
            match next {
                Some(n) => {
                    self.enter(n);
                    stack.push(graph.neighbors(n));
                }
                None => {
                    if self.path.len() > best.len() {
                        best.clone_from(&self.path);
                    }
                    stack.pop();
                    self.leave();
                }
            }
        }
        false
    }

    fn enter(&mut self, v: NodeIndex) {
        self.on_path[v.index()] = true;
        self.path.push(v);
    }

    fn leave(&mut self) {
        if let Some(v) = self.path.pop() {
            self.on_path[v.index()] = false;
        }
    }
}
