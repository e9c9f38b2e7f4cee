//! Lines command implementation.

use anyhow::Result;
use console::style;
use serde_json::json;

use super::common::{join_nodes, load_device, print_json};
use crate::config::OutputConfig;

/// Execute the lines command.
///
/// Refuses devices larger than `max_nodes`, since the longest-path search
/// is exponential in the worst case.
pub fn execute(input: &str, lengths: &[usize], max_nodes: usize, out: &OutputConfig) -> Result<()> {
    let arch = load_device(input)?;
    if arch.n_nodes() > max_nodes {
        anyhow::bail!(
            "Device has {} nodes, line search is limited to {max_nodes} \
             (raise analysis.max_line_search_nodes to allow it)",
            arch.n_nodes()
        );
    }

    let lines = arch.lines(lengths)?;

    if out.is_json() {
        return print_json(&json!({ "requested": lengths, "lines": lines }), out.pretty);
    }

    println!(
        "{} Found {} of {} requested lines",
        style("✓").green().bold(),
        lines.len(),
        lengths.len()
    );
    for (i, line) in lines.iter().enumerate() {
        println!("  {:>3} [{}]: {}", i, line.len(), join_nodes(line));
    }
    if lines.len() < lengths.len() {
        println!(
            "  {} some lengths could not be satisfied",
            style("!").yellow().bold()
        );
    }

    Ok(())
}
