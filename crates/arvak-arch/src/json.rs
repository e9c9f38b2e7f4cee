//! JSON device descriptions.
//!
//! Layout:
//!
//! ```text
//! {
//!   "nodes": [<Node>, ...],
//!   "links": [{ "link": [<Node>, <Node>], "weight": <float> }, ...]
//! }
//! ```
//!
//! `nodes` is written in the architecture's insertion order. Placement
//! relies on node indices staying stable across a round trip, so decoding
//! adds the nodes in exactly that order before adding any link.

use serde::{Deserialize, Deserializer, Serialize};

use crate::architecture::Architecture;
use crate::error::ArchResult;
use crate::node::Node;

/// One weighted connection in a device description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// Source and target.
    pub link: (Node, Node),
    /// Connection weight.
    pub weight: f64,
}

/// Serialized form of an [`Architecture`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDescription {
    /// Nodes in insertion order.
    pub nodes: Vec<Node>,
    /// Weighted connections.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub links: Vec<LinkEntry>,
}

/// Older producers write `"links": null` for a device without connections.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<LinkEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<LinkEntry>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Encode an architecture as a device description.
pub fn encode(arch: &Architecture) -> DeviceDescription {
    DeviceDescription {
        nodes: arch.nodes().cloned().collect(),
        links: arch
            .weighted_connections()
            .into_iter()
            .map(|(a, b, weight)| LinkEntry {
                link: (a, b),
                weight,
            })
            .collect(),
    }
}

/// Decode a device description.
///
/// Fails if a link references a node missing from `nodes`, or if a node is
/// listed twice.
pub fn decode(desc: &DeviceDescription) -> ArchResult<Architecture> {
    let mut arch = Architecture::from_nodes(desc.nodes.iter().cloned())?;
    for entry in &desc.links {
        arch.add_weighted_connection(&entry.link.0, &entry.link.1, entry.weight)?;
    }
    Ok(arch)
}

/// Encode as a JSON value.
pub fn to_json_value(arch: &Architecture) -> ArchResult<serde_json::Value> {
    Ok(serde_json::to_value(encode(arch))?)
}

/// Decode from a JSON value.
pub fn from_json_value(value: serde_json::Value) -> ArchResult<Architecture> {
    let desc: DeviceDescription = serde_json::from_value(value)?;
    decode(&desc)
}

/// Encode as a JSON string.
pub fn to_json_string(arch: &Architecture, pretty: bool) -> ArchResult<String> {
    let desc = encode(arch);
    let s = if pretty {
        serde_json::to_string_pretty(&desc)?
    } else {
        serde_json::to_string(&desc)?
    };
    Ok(s)
}

/// Decode from a JSON string.
pub fn from_json_str(s: &str) -> ArchResult<Architecture> {
    let desc: DeviceDescription = serde_json::from_str(s)?;
    decode(&desc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArchError;
    use crate::topology::square_grid;

    #[test]
    fn test_field_layout() {
        let mut arch = Architecture::from_nodes([Node::new(1), Node::new(0)]).unwrap();
        arch.add_weighted_connection(&Node::new(1), &Node::new(0), 0.5)
            .unwrap();

        let s = to_json_string(&arch, false).unwrap();
        assert_eq!(
            s,
            r#"{"nodes":[["node",[1]],["node",[0]]],"links":[{"link":[["node",[1]],["node",[0]]],"weight":0.5}]}"#
        );
    }

    #[test]
    fn test_roundtrip_preserves_order_and_weights() {
        let mut arch = square_grid(2, 2, 2).unwrap();
        arch.add_weighted_connection(
            &Node::named_3d("gridNode", 1, 1, 1),
            &Node::named_3d("gridNode", 0, 0, 0),
            2.5,
        )
        .unwrap();

        let back = from_json_str(&to_json_string(&arch, true).unwrap()).unwrap();
        assert_eq!(back, arch);
        assert!(back.nodes().eq(arch.nodes()));
        assert_eq!(back.connections(), arch.connections());
    }

    #[test]
    fn test_decode_unknown_node() {
        let s = r#"{"nodes":[["node",[0]]],"links":[{"link":[["node",[0]],["node",[1]]],"weight":1.0}]}"#;
        assert!(matches!(
            from_json_str(s),
            Err(ArchError::NodeNotFound { .. })
        ));
    }

    #[test]
    fn test_decode_null_links() {
        let arch = from_json_str(r#"{"nodes":[["q",[0]],["q",[1]]],"links":null}"#).unwrap();
        assert_eq!(arch.n_nodes(), 2);
        assert_eq!(arch.n_connections(), 0);
    }

    #[test]
    fn test_decode_rejects_non_finite_weight() {
        let desc = DeviceDescription {
            nodes: vec![Node::new(0), Node::new(1)],
            links: vec![LinkEntry {
                link: (Node::new(0), Node::new(1)),
                weight: f64::INFINITY,
            }],
        };
        assert!(matches!(decode(&desc), Err(ArchError::InvalidWeight { .. })));

        // Stored weights survive the text form.
        let mut arch = Architecture::from_nodes([Node::new(0), Node::new(1)]).unwrap();
        arch.add_weighted_connection(&Node::new(0), &Node::new(1), 1024.0)
            .unwrap();
        arch.add_weighted_connection(&Node::new(1), &Node::new(0), -0.125)
            .unwrap();
        assert!(!to_json_string(&arch, false).unwrap().contains("null"));
        let back = from_json_str(&to_json_string(&arch, false).unwrap()).unwrap();
        assert_eq!(back, arch);
    }

    #[test]
    fn test_decode_malformed() {
        assert!(matches!(from_json_str("{\"links\":[]}"), Err(ArchError::Json(_))));
    }
}
