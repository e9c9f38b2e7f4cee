//! Error types for the architecture crate.

use thiserror::Error;

use crate::node::Node;

/// Errors that can occur when building or querying an [`Architecture`](crate::Architecture).
///
/// Every variant is a precondition violation raised synchronously at the
/// offending call; none of them are transient.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArchError {
    /// Node is not part of the architecture.
    #[error("Node {node} not found in architecture")]
    NodeNotFound {
        /// The node that was not found.
        node: Node,
    },

    /// Connection is not part of the architecture.
    #[error("Connection {from} -> {to} not found in architecture")]
    ConnectionNotFound {
        /// Source endpoint.
        from: Node,
        /// Target endpoint.
        to: Node,
    },

    /// Connection weight is NaN or infinite.
    #[error("Connection {from} -> {to} has non-finite weight {weight}")]
    InvalidWeight {
        /// Source endpoint.
        from: Node,
        /// Target endpoint.
        to: Node,
        /// The rejected weight.
        weight: f64,
    },

    /// Node was added twice.
    #[error("Node {0} already exists in architecture")]
    DuplicateNode(Node),

    /// Connection from a node to itself.
    #[error("Connection from node {0} to itself is not allowed")]
    SelfConnection(Node),

    /// Malformed node identifier.
    #[error("Invalid node: {0}")]
    InvalidNode(String),

    /// Query requires at least one node.
    #[error("No nodes in architecture")]
    EmptyArchitecture,

    /// No path exists between the two nodes.
    #[error("Node {to} is unreachable from {from}")]
    Unreachable {
        /// Start of the query.
        from: Node,
        /// End of the query.
        to: Node,
    },

    /// Line decomposition asked for more nodes than the device has.
    #[error("Not enough nodes to satisfy required lengths: need {required}, have {available}")]
    InsufficientNodes {
        /// Sum of the requested line lengths.
        required: usize,
        /// Number of nodes in the architecture.
        available: usize,
    },

    /// Topology descriptor could not be parsed or is too large to build.
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    /// Malformed device description.
    #[error("Device description error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for architecture operations.
pub type ArchResult<T> = Result<T, ArchError>;
