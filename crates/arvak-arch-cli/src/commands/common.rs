//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use arvak_arch::{Architecture, Node, json};

/// Load a device description from a JSON file.
pub fn load_device(path: &str) -> Result<Architecture> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    json::from_json_str(&source).with_context(|| format!("Invalid device description: {path}"))
}

/// Write a device description to a JSON file.
pub fn save_device(arch: &Architecture, path: &str, pretty: bool) -> Result<()> {
    let text = json::to_json_string(arch, pretty)?;
    fs::write(path, text).with_context(|| format!("Failed to write file: {path}"))?;
    Ok(())
}

/// Parse a node given on the command line (`ringNode[3]` or `3`).
pub fn parse_node(s: &str) -> Result<Node> {
    s.parse()
        .with_context(|| format!("Invalid node '{s}'; expected e.g. 'gridNode[0, 1, 0]' or '3'"))
}

/// Print a value as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}

/// Join nodes for display.
pub fn join_nodes<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> String {
    nodes
        .into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
