//! Arvak Device Architectures
//!
//! This crate models the physical connectivity of a quantum device as a
//! graph and provides the graph analyses that layout and routing need when
//! mapping logical qubits onto restricted hardware.
//!
//! # Overview
//!
//! - **Nodes**: [`Node`] identifies one physical qubit by register name and
//!   one to three coordinates
//! - **Architecture**: [`Architecture`] holds nodes in insertion order plus
//!   directed, weighted connections
//! - **Distances**: shortest-path distance, distance fingerprints and
//!   diameter
//! - **Lines**: decomposition of the device into disjoint simple paths
//! - **Articulation points**: global cut vertices, and cut vertices of a
//!   sub-architecture relative to the full device
//! - **Pruning**: greedy removal of the least useful nodes
//! - **Topologies**: canonical fully-connected, ring and layered grid devices
//! - **JSON**: the order-preserving device description format
//!
//! # Example
//!
//! ```rust
//! use arvak_arch::topology;
//!
//! let mut arch = topology::ring(6).unwrap();
//! assert_eq!(arch.diameter().unwrap(), 3);
//! assert!(arch.articulation_points().is_empty());
//!
//! let lines = arch.lines(&[3, 2]).unwrap();
//! assert_eq!(lines.len(), 2);
//!
//! let removed = arch.remove_worst_nodes(2);
//! assert_eq!(removed.len(), 2);
//! assert!(!arch.contains_node(removed.iter().next().unwrap()));
//! ```
//!
//! # Device description
//!
//! ```rust
//! use arvak_arch::{json, topology};
//!
//! let arch = topology::square_grid(2, 2, 1).unwrap();
//! let text = json::to_json_string(&arch, false).unwrap();
//! let back = json::from_json_str(&text).unwrap();
//! assert_eq!(back, arch);
//! ```

pub mod architecture;
pub mod articulation;
pub mod distance;
pub mod error;
pub mod json;
pub mod lines;
pub mod node;
pub mod prune;
pub mod topology;

pub use architecture::{Architecture, Connection, DEFAULT_WEIGHT, WeightedConnection};
pub use error::{ArchError, ArchResult};
pub use json::{DeviceDescription, LinkEntry};
pub use node::Node;
pub use prune::{FingerprintOrder, compare_fingerprints};
pub use topology::Topology;
