//! Articulation points command implementation.

use anyhow::Result;
use console::style;
use serde_json::json;

use super::common::{join_nodes, load_device, print_json};
use crate::config::OutputConfig;

/// Execute the aps command.
///
/// With `sub`, reports the nodes of the sub-device whose removal from the
/// full device separates other nodes of the sub-device.
pub fn execute(input: &str, sub: Option<&str>, out: &OutputConfig) -> Result<()> {
    let arch = load_device(input)?;

    let aps = match sub {
        Some(path) => {
            let sub = load_device(path)?;
            arch.subgraph_articulation_points(&sub)?
        }
        None => arch.articulation_points(),
    };

    if out.is_json() {
        return print_json(&json!({ "articulation_points": aps }), out.pretty);
    }

    let scope = if sub.is_some() { "sub-device" } else { "device" };
    if aps.is_empty() {
        println!(
            "{} No articulation points in {scope}",
            style("✓").green().bold()
        );
    } else {
        println!(
            "{} {} articulation points in {scope}",
            style("→").cyan().bold(),
            aps.len()
        );
        println!("  {}", join_nodes(&aps));
    }

    Ok(())
}
