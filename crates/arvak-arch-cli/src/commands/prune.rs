//! Prune command implementation.

use anyhow::Result;
use console::style;
use serde_json::json;

use super::common::{join_nodes, load_device, print_json, save_device};
use crate::config::OutputConfig;

/// Execute the prune command.
pub fn execute(input: &str, num: usize, output: Option<&str>, out: &OutputConfig) -> Result<()> {
    let mut arch = load_device(input)?;
    let before = arch.n_nodes();

    let removed = arch.remove_worst_nodes(num);

    if let Some(path) = output {
        save_device(&arch, path, out.pretty)?;
    }

    if out.is_json() {
        return print_json(
            &json!({
                "requested": num,
                "removed": removed,
                "remaining": arch.n_nodes(),
            }),
            out.pretty,
        );
    }

    println!(
        "{} Removed {} of {} nodes, {} remain",
        style("✓").green().bold(),
        removed.len(),
        before,
        arch.n_nodes()
    );
    if !removed.is_empty() {
        println!("  Removed: {}", join_nodes(&removed));
    }
    if removed.len() < num {
        println!(
            "  {} stopped early: every remaining minimum-degree node is a cut vertex",
            style("!").yellow().bold()
        );
    }
    if let Some(path) = output {
        println!("  Output: {}", style(path).green());
    }

    Ok(())
}
