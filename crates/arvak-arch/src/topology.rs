//! Canonical device topologies.
//!
//! Each topology is a pure function of a few integers producing a node list
//! in canonical order plus a connection list, which are fed into
//! [`Architecture::from_parts`]. Node names are derived from the parameters
//! only, so a canonical device can be recognised from its node names.
//!
//! Register names must start with a lowercase letter so that circuits mapped
//! onto these devices can be written out as OpenQASM identifiers.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::architecture::{Architecture, Connection};
use crate::error::{ArchError, ArchResult};
use crate::node::Node;

/// Register of fully-connected device nodes.
pub const FULLY_CONNECTED_REGISTER: &str = "fcNode";
/// Register of ring device nodes.
pub const RING_REGISTER: &str = "ringNode";
/// Register of square-grid device nodes.
pub const GRID_REGISTER: &str = "gridNode";

/// A parametrically generated device topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Topology {
    /// Every ordered pair of distinct nodes is connected.
    FullyConnected {
        /// Number of nodes.
        nodes: u32,
    },
    /// Node `i` is connected to node `(i + 1) mod n`.
    Ring {
        /// Number of nodes.
        nodes: u32,
    },
    /// Stack of `layers` 2-D grids of `rows x cols` nodes, joined along the
    /// layer axis.
    SquareGrid {
        /// Rows per layer.
        rows: u32,
        /// Columns per layer.
        cols: u32,
        /// Number of layers.
        layers: u32,
    },
}

impl Topology {
    /// Number of nodes in the topology, or `None` if it does not fit in a
    /// `usize`.
    pub fn n_nodes(&self) -> Option<usize> {
        match *self {
            Topology::FullyConnected { nodes } | Topology::Ring { nodes } => {
                usize::try_from(nodes).ok()
            }
            Topology::SquareGrid { rows, cols, layers } => usize::try_from(rows)
                .ok()?
                .checked_mul(usize::try_from(cols).ok()?)?
                .checked_mul(usize::try_from(layers).ok()?),
        }
    }

    /// Nodes in canonical order.
    ///
    /// Grid nodes are ordered layer by layer, then row by row.
    pub fn nodes(&self) -> Vec<Node> {
        match *self {
            Topology::FullyConnected { nodes } => (0..nodes)
                .map(|i| Node::named(FULLY_CONNECTED_REGISTER, i))
                .collect(),
            Topology::Ring { nodes } => (0..nodes).map(|i| Node::named(RING_REGISTER, i)).collect(),
            Topology::SquareGrid { rows, cols, layers } => {
                let mut out = Vec::with_capacity(self.n_nodes().unwrap_or_default());
                for l in 0..layers {
                    for r in 0..rows {
                        for c in 0..cols {
                            out.push(Node::named_3d(GRID_REGISTER, r, c, l));
                        }
                    }
                }
                out
            }
        }
    }

    /// Directed connections of the topology.
    pub fn connections(&self) -> Vec<Connection> {
        match *self {
            Topology::FullyConnected { nodes } => {
                let pairs = (nodes as usize).checked_mul((nodes as usize).saturating_sub(1));
                let mut out = Vec::with_capacity(pairs.unwrap_or_default());
                for i in 0..nodes {
                    for j in 0..nodes {
                        if i != j {
                            out.push((
                                Node::named(FULLY_CONNECTED_REGISTER, i),
                                Node::named(FULLY_CONNECTED_REGISTER, j),
                            ));
                        }
                    }
                }
                out
            }
            Topology::Ring { nodes } => (0..nodes)
                .filter_map(|i| {
                    let next = (i + 1) % nodes;
                    // A single-node ring would connect to itself.
                    (next != i).then(|| {
                        (
                            Node::named(RING_REGISTER, i),
                            Node::named(RING_REGISTER, next),
                        )
                    })
                })
                .collect(),
            Topology::SquareGrid { rows, cols, layers } => {
                let mut out = Vec::new();
                for l in 0..layers {
                    for r in 0..rows {
                        for c in 0..cols {
                            let n = Node::named_3d(GRID_REGISTER, r, c, l);
                            if c + 1 < cols {
                                out.push((n.clone(), Node::named_3d(GRID_REGISTER, r, c + 1, l)));
                            }
                            if r + 1 < rows {
                                out.push((n.clone(), Node::named_3d(GRID_REGISTER, r + 1, c, l)));
                            }
                            if l + 1 < layers {
                                out.push((n, Node::named_3d(GRID_REGISTER, r, c, l + 1)));
                            }
                        }
                    }
                }
                out
            }
        }
    }

    /// Build the architecture for this topology.
    ///
    /// Fails with [`ArchError::InvalidTopology`] when the node count
    /// overflows a `usize`.
    pub fn build(&self) -> ArchResult<Architecture> {
        if self.n_nodes().is_none() {
            return Err(ArchError::InvalidTopology(format!("{self} has too many nodes")));
        }
        Architecture::from_parts(self.nodes(), self.connections())
    }

    /// Recognise a canonical device from its node names and connectivity.
    ///
    /// Returns `None` unless `arch` has exactly the nodes and the connected
    /// pairs of one of the canonical topologies. Node order and connection
    /// direction are not compared.
    pub fn identify(arch: &Architecture) -> Option<Topology> {
        let first = arch.nodes().next()?;
        let register = first.register();
        if arch.nodes().any(|n| n.register() != register) {
            return None;
        }

        let n = u32::try_from(arch.n_nodes()).ok()?;
        let candidate = match register {
            FULLY_CONNECTED_REGISTER => Topology::FullyConnected { nodes: n },
            RING_REGISTER => Topology::Ring { nodes: n },
            GRID_REGISTER => {
                let mut dims = [0u32; 3];
                for node in arch.nodes() {
                    let index = node.index();
                    if index.len() != 3 {
                        return None;
                    }
                    for (d, &i) in dims.iter_mut().zip(index) {
                        *d = (*d).max(i.checked_add(1)?);
                    }
                }
                Topology::SquareGrid {
                    rows: dims[0],
                    cols: dims[1],
                    layers: dims[2],
                }
            }
            _ => return None,
        };

        // Sparse coordinates can name a grid far larger than the device.
        if candidate.n_nodes()? != arch.n_nodes() {
            return None;
        }
        let canonical = candidate.build().ok()?;
        same_shape(arch, &canonical).then_some(candidate)
    }
}

fn same_shape(a: &Architecture, b: &Architecture) -> bool {
    let nodes = |arch: &Architecture| arch.nodes().cloned().collect::<BTreeSet<_>>();
    if nodes(a) != nodes(b) {
        return false;
    }
    let covered = |x: &Architecture, y: &Architecture| {
        x.connections()
            .iter()
            .all(|(s, t)| y.connection_exists(s, t))
    };
    covered(a, b) && covered(b, a)
}

/// Fully-connected device with `n` nodes.
pub fn fully_connected(n: u32) -> ArchResult<Architecture> {
    Topology::FullyConnected { nodes: n }.build()
}

/// Ring device with `n` nodes.
pub fn ring(n: u32) -> ArchResult<Architecture> {
    Topology::Ring { nodes: n }.build()
}

/// Layered square-grid device.
pub fn square_grid(rows: u32, cols: u32, layers: u32) -> ArchResult<Architecture> {
    Topology::SquareGrid { rows, cols, layers }.build()
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::FullyConnected { nodes } => write!(f, "full:{nodes}"),
            Topology::Ring { nodes } => write!(f, "ring:{nodes}"),
            Topology::SquareGrid { rows, cols, layers } => write!(f, "grid:{rows}x{cols}x{layers}"),
        }
    }
}

impl FromStr for Topology {
    type Err = ArchError;

    /// Parse `full:N`, `ring:N`, `grid:RxC` or `grid:RxCxL`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ArchError::InvalidTopology(s.to_string());
        let (kind, params) = s.trim().split_once(':').ok_or_else(invalid)?;
        let dims = params
            .split('x')
            .map(|p| p.trim().parse::<u32>().map_err(|_| invalid()))
            .collect::<ArchResult<Vec<_>>>()?;

        match (kind.to_lowercase().as_str(), dims.as_slice()) {
            ("full" | "fc" | "fully_connected", &[nodes]) => Ok(Topology::FullyConnected { nodes }),
            ("ring", &[nodes]) => Ok(Topology::Ring { nodes }),
            ("grid", &[rows, cols]) => Ok(Topology::SquareGrid {
                rows,
                cols,
                layers: 1,
            }),
            ("grid", &[rows, cols, layers]) => Ok(Topology::SquareGrid { rows, cols, layers }),
            _ => Err(invalid()),
        }
    }
}
