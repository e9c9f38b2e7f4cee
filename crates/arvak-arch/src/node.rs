//! Physical node identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ArchError, ArchResult};

/// Register used for nodes built from a bare index.
pub const DEFAULT_REGISTER: &str = "node";

/// Maximum number of coordinates a node may carry.
pub const MAX_COORDINATES: usize = 3;

/// Identifier of one physical qubit on a device.
///
/// A node is a register name plus one to three coordinates. Nodes built from
/// a bare index live in the [`DEFAULT_REGISTER`], so `Node::new(3)` and
/// `Node::named("node", 3)` are the same node.
///
/// Ordering compares the register name first and then the coordinates
/// lexicographically, which gives a stable iteration order for sets of
/// nodes.
///
/// The JSON form is `["register", [i, j, k]]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub struct Node {
    register: String,
    index: Vec<u32>,
}

impl Node {
    /// Create a node in the default register.
    pub fn new(index: u32) -> Self {
        Self::named(DEFAULT_REGISTER, index)
    }

    /// Create a node with one coordinate in a named register.
    pub fn named(register: impl Into<String>, index: u32) -> Self {
        Self {
            register: register.into(),
            index: vec![index],
        }
    }

    /// Create a node with two coordinates in a named register.
    pub fn named_2d(register: impl Into<String>, row: u32, col: u32) -> Self {
        Self {
            register: register.into(),
            index: vec![row, col],
        }
    }

    /// Create a node with three coordinates in a named register.
    pub fn named_3d(register: impl Into<String>, row: u32, col: u32, layer: u32) -> Self {
        Self {
            register: register.into(),
            index: vec![row, col, layer],
        }
    }

    /// Create a node from a register name and a coordinate list.
    ///
    /// Fails if the register name is empty or the coordinate count is not
    /// between one and [`MAX_COORDINATES`].
    pub fn try_from_parts(register: impl Into<String>, index: Vec<u32>) -> ArchResult<Self> {
        let register = register.into();
        if register.is_empty() {
            return Err(ArchError::InvalidNode("empty register name".into()));
        }
        if index.is_empty() || index.len() > MAX_COORDINATES {
            return Err(ArchError::InvalidNode(format!(
                "{register} has {} coordinates, expected 1 to {MAX_COORDINATES}",
                index.len()
            )));
        }
        Ok(Self { register, index })
    }

    /// The register name.
    pub fn register(&self) -> &str {
        &self.register
    }

    /// The coordinates within the register.
    pub fn index(&self) -> &[u32] {
        &self.index
    }
}

impl From<u32> for Node {
    fn from(index: u32) -> Self {
        Node::new(index)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.register)?;
        for (i, coord) in self.index.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{coord}")?;
        }
        write!(f, "]")
    }
}

impl FromStr for Node {
    type Err = ArchError;

    /// Parse `reg[i]`, `reg[i, j]`, `reg[i, j, k]` or a bare index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<u32>() {
            return Ok(Node::new(index));
        }

        let invalid = || ArchError::InvalidNode(format!("cannot parse '{s}'"));
        let (register, rest) = s.split_once('[').ok_or_else(invalid)?;
        let coords = rest.strip_suffix(']').ok_or_else(invalid)?;
        let index = coords
            .split(',')
            .map(|c| c.trim().parse::<u32>().map_err(|_| invalid()))
            .collect::<ArchResult<Vec<_>>>()?;

        Node::try_from_parts(register.trim(), index)
    }
}

/// Wire form of a [`Node`].
#[derive(Serialize, Deserialize)]
struct RawNode(String, Vec<u32>);

impl TryFrom<RawNode> for Node {
    type Error = ArchError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        Node::try_from_parts(raw.0, raw.1)
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        RawNode(node.register, node.index)
    }
}
