//! Distance command implementation.

use anyhow::Result;
use console::style;
use serde_json::json;

use super::common::{join_nodes, load_device, parse_node, print_json};
use crate::config::OutputConfig;

/// Execute the distance command.
pub fn execute(input: &str, from: &str, to: &str, out: &OutputConfig) -> Result<()> {
    let arch = load_device(input)?;
    let from = parse_node(from)?;
    let to = parse_node(to)?;

    let distance = arch.distance(&from, &to)?;
    let path = arch.shortest_path(&from, &to)?;

    if out.is_json() {
        return print_json(
            &json!({
                "from": from,
                "to": to,
                "distance": distance,
                "path": path,
            }),
            out.pretty,
        );
    }

    println!(
        "{} {} -> {}: distance {}",
        style("→").cyan().bold(),
        style(&from).green(),
        style(&to).green(),
        style(distance).yellow()
    );
    println!("  Path: {}", join_nodes(&path));

    Ok(())
}
