//! The device connectivity graph.
//!
//! An [`Architecture`] is a set of [`Node`]s plus directed, weighted
//! connections between them. Node insertion order is preserved and is the
//! externally visible index order: the connectivity matrix, distance
//! fingerprints and the JSON device description all follow it.
//!
//! Most analyses only care about the underlying undirected graph, which is
//! available through [`Architecture::undirected`].

use std::collections::BTreeSet;

use ndarray::Array2;
use petgraph::graph::UnGraph;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{ArchError, ArchResult};
use crate::node::Node;

/// Weight given to connections added without an explicit weight.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A directed connection between two nodes.
pub type Connection = (Node, Node);

/// A directed connection with its weight.
pub type WeightedConnection = (Node, Node, f64);

/// Connectivity graph of a quantum device.
///
/// ## Storage
///
/// Connections live in a petgraph `StableDiGraph` so that node removal does
/// not invalidate the indices of the remaining nodes. A separate `order`
/// vector records insertion order, and `lookup` maps each node to its graph
/// index.
///
/// Cloning produces a fully independent copy.
#[derive(Debug, Clone, Default)]
pub struct Architecture {
    graph: StableDiGraph<Node, f64>,
    order: Vec<NodeIndex>,
    lookup: FxHashMap<Node, NodeIndex>,
}

impl Architecture {
    /// Create an empty architecture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an architecture with the given nodes and no connections.
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> ArchResult<Self> {
        let mut arch = Self::new();
        for node in nodes {
            arch.add_node(node)?;
        }
        Ok(arch)
    }

    /// Create an architecture from a list of connections.
    ///
    /// Endpoints are added as nodes in order of first appearance.
    pub fn from_connections(connections: impl IntoIterator<Item = Connection>) -> ArchResult<Self> {
        let mut arch = Self::new();
        for (a, b) in connections {
            arch.ensure_node(&a);
            arch.ensure_node(&b);
            arch.add_connection(&a, &b)?;
        }
        Ok(arch)
    }

    /// Create an architecture from an explicit node list and connection list.
    ///
    /// Every connection endpoint must appear in `nodes`.
    pub fn from_parts(
        nodes: impl IntoIterator<Item = Node>,
        connections: impl IntoIterator<Item = Connection>,
    ) -> ArchResult<Self> {
        let mut arch = Self::from_nodes(nodes)?;
        for (a, b) in connections {
            arch.add_connection(&a, &b)?;
        }
        Ok(arch)
    }

    /// Like [`from_parts`](Self::from_parts), with a weight on every connection.
    pub fn from_weighted_parts(
        nodes: impl IntoIterator<Item = Node>,
        connections: impl IntoIterator<Item = WeightedConnection>,
    ) -> ArchResult<Self> {
        let mut arch = Self::from_nodes(nodes)?;
        for (a, b, weight) in connections {
            arch.add_weighted_connection(&a, &b, weight)?;
        }
        Ok(arch)
    }

    /// Check whether a node is part of the architecture.
    #[inline]
    pub fn contains_node(&self, node: &Node) -> bool {
        self.lookup.contains_key(node)
    }

    /// Add a node at the end of the node order.
    pub fn add_node(&mut self, node: Node) -> ArchResult<()> {
        if self.contains_node(&node) {
            return Err(ArchError::DuplicateNode(node));
        }
        let idx = self.graph.add_node(node.clone());
        self.order.push(idx);
        self.lookup.insert(node, idx);
        Ok(())
    }

    fn ensure_node(&mut self, node: &Node) {
        if !self.contains_node(node) {
            let idx = self.graph.add_node(node.clone());
            self.order.push(idx);
            self.lookup.insert(node.clone(), idx);
        }
    }

    /// Remove a node together with all of its connections.
    pub fn remove_node(&mut self, node: &Node) -> ArchResult<()> {
        let idx = self.index_of(node)?;
        self.graph.remove_node(idx);
        self.order.retain(|&i| i != idx);
        self.lookup.remove(node);
        Ok(())
    }

    /// Add a connection `from -> to` with the default weight.
    pub fn add_connection(&mut self, from: &Node, to: &Node) -> ArchResult<()> {
        self.add_weighted_connection(from, to, DEFAULT_WEIGHT)
    }

    /// Add a connection `from -> to` with the given weight.
    ///
    /// Adding a connection that already exists replaces its weight. The
    /// weight must be finite.
    pub fn add_weighted_connection(&mut self, from: &Node, to: &Node, weight: f64) -> ArchResult<()> {
        let a = self.index_of(from)?;
        let b = self.index_of(to)?;
        if a == b {
            return Err(ArchError::SelfConnection(from.clone()));
        }
        if !weight.is_finite() {
            return Err(ArchError::InvalidWeight {
                from: from.clone(),
                to: to.clone(),
                weight,
            });
        }
        self.graph.update_edge(a, b, weight);
        Ok(())
    }

    /// Remove the connection `from -> to`.
    pub fn remove_connection(&mut self, from: &Node, to: &Node) -> ArchResult<()> {
        let a = self.index_of(from)?;
        let b = self.index_of(to)?;
        let edge = self
            .graph
            .find_edge(a, b)
            .ok_or_else(|| ArchError::ConnectionNotFound {
                from: from.clone(),
                to: to.clone(),
            })?;
        self.graph.remove_edge(edge);
        Ok(())
    }

    /// Weight of the connection `from -> to`.
    pub fn connection_weight(&self, from: &Node, to: &Node) -> ArchResult<f64> {
        let a = self.index_of(from)?;
        let b = self.index_of(to)?;
        self.graph
            .find_edge(a, b)
            .and_then(|e| self.graph.edge_weight(e).copied())
            .ok_or_else(|| ArchError::ConnectionNotFound {
                from: from.clone(),
                to: to.clone(),
            })
    }

    /// Check for the directed connection `from -> to`.
    ///
    /// Unknown nodes have no connections, so this returns `false` for them.
    pub fn has_connection(&self, from: &Node, to: &Node) -> bool {
        match (self.lookup.get(from), self.lookup.get(to)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Check for a connection between two nodes in either direction.
    pub fn connection_exists(&self, a: &Node, b: &Node) -> bool {
        self.has_connection(a, b) || self.has_connection(b, a)
    }

    /// Number of nodes.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.order.len()
    }

    /// Number of directed connections.
    #[inline]
    pub fn n_connections(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check if the architecture has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over the nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.order.iter().map(|&idx| &self.graph[idx])
    }

    /// Position of a node in the node order.
    pub fn position(&self, node: &Node) -> ArchResult<usize> {
        let idx = self.index_of(node)?;
        self.order
            .iter()
            .position(|&i| i == idx)
            .ok_or_else(|| ArchError::NodeNotFound { node: node.clone() })
    }

    /// All directed connections.
    pub fn connections(&self) -> Vec<Connection> {
        self.graph
            .edge_references()
            .map(|e| (self.graph[e.source()].clone(), self.graph[e.target()].clone()))
            .collect()
    }

    /// All directed connections with their weights.
    pub fn weighted_connections(&self) -> Vec<WeightedConnection> {
        self.graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].clone(),
                    self.graph[e.target()].clone(),
                    *e.weight(),
                )
            })
            .collect()
    }

    /// Undirected view of the connectivity.
    ///
    /// Node `i` of the returned graph is the `i`-th node in insertion order,
    /// and there is exactly one edge per connected unordered pair.
    pub fn undirected(&self) -> UnGraph<Node, ()> {
        let positions = self.positions();
        let mut graph = UnGraph::with_capacity(self.order.len(), self.graph.edge_count());
        for &idx in &self.order {
            graph.add_node(self.graph[idx].clone());
        }

        let mut seen = FxHashSet::default();
        for edge in self.graph.edge_references() {
            let a = positions[&edge.source()];
            let b = positions[&edge.target()];
            if seen.insert((a.min(b), a.max(b))) {
                graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
            }
        }
        graph
    }

    /// Neighbours of a node in either direction, in node order.
    pub fn neighbours(&self, node: &Node) -> ArchResult<Vec<Node>> {
        let idx = self.index_of(node)?;
        let adjacent: FxHashSet<NodeIndex> = self.graph.neighbors_undirected(idx).collect();
        Ok(self
            .order
            .iter()
            .filter(|i| adjacent.contains(i))
            .map(|&i| self.graph[i].clone())
            .collect())
    }

    /// Number of distinct neighbours of a node.
    pub fn degree(&self, node: &Node) -> ArchResult<usize> {
        let idx = self.index_of(node)?;
        Ok(self.undirected_degree(idx))
    }

    /// Nodes with the smallest degree.
    pub fn min_degree_nodes(&self) -> BTreeSet<Node> {
        self.extreme_degree_nodes(|candidate, best| candidate < best)
    }

    /// Nodes with the largest degree.
    pub fn max_degree_nodes(&self) -> BTreeSet<Node> {
        self.extreme_degree_nodes(|candidate, best| candidate > best)
    }

    fn extreme_degree_nodes(&self, better: impl Fn(usize, usize) -> bool) -> BTreeSet<Node> {
        let mut best: Option<usize> = None;
        let mut out = BTreeSet::new();
        for &idx in &self.order {
            let degree = self.undirected_degree(idx);
            match best {
                Some(b) if degree == b => {
                    out.insert(self.graph[idx].clone());
                }
                Some(b) if !better(degree, b) => {}
                _ => {
                    best = Some(degree);
                    out.clear();
                    out.insert(self.graph[idx].clone());
                }
            }
        }
        out
    }

    fn undirected_degree(&self, idx: NodeIndex) -> usize {
        self.graph
            .neighbors_undirected(idx)
            .collect::<FxHashSet<_>>()
            .len()
    }

    /// Build the sub-architecture induced by `nodes`.
    ///
    /// The result contains exactly the given nodes, in the given order, and
    /// every connection of `self` whose endpoints are both in the subset,
    /// with its weight.
    pub fn subarchitecture(&self, nodes: &[Node]) -> ArchResult<Architecture> {
        for node in nodes {
            self.index_of(node)?;
        }
        let mut sub = Architecture::from_nodes(nodes.iter().cloned())?;
        for (a, b, weight) in self.weighted_connections() {
            if sub.contains_node(&a) && sub.contains_node(&b) {
                sub.add_weighted_connection(&a, &b, weight)?;
            }
        }
        Ok(sub)
    }

    /// Dense symmetric adjacency matrix in node order.
    ///
    /// Entry `(i, j)` is true iff nodes `i` and `j` are connected in either
    /// direction.
    pub fn connectivity_matrix(&self) -> Array2<bool> {
        let n = self.order.len();
        let positions = self.positions();
        let mut matrix = Array2::from_elem((n, n), false);
        for edge in self.graph.edge_references() {
            let a = positions[&edge.source()];
            let b = positions[&edge.target()];
            matrix[[a, b]] = true;
            matrix[[b, a]] = true;
        }
        matrix
    }

    pub(crate) fn index_of(&self, node: &Node) -> ArchResult<NodeIndex> {
        self.lookup
            .get(node)
            .copied()
            .ok_or_else(|| ArchError::NodeNotFound { node: node.clone() })
    }

    fn positions(&self) -> FxHashMap<NodeIndex, usize> {
        self.order.iter().enumerate().map(|(pos, &idx)| (idx, pos)).collect()
    }
}

impl PartialEq for Architecture {
    /// Same node order and the same weighted connection set.
    fn eq(&self, other: &Self) -> bool {
        if !self.nodes().eq(other.nodes()) {
            return false;
        }
        let sorted = |arch: &Architecture| {
            let mut conns = arch.weighted_connections();
            conns.sort_by(|x, y| (&x.0, &x.1).cmp(&(&y.0, &y.1)));
            conns
        };
        sorted(self) == sorted(other)
    }
}
