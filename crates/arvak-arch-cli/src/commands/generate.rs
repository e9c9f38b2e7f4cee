//! Generate command implementation.

use anyhow::{Context, Result};
use console::style;

use arvak_arch::Topology;
use arvak_arch::json;

use super::common::save_device;
use crate::config::OutputConfig;

/// Execute the generate command.
pub fn execute(topology: &str, output: Option<&str>, out: &OutputConfig) -> Result<()> {
    let topology: Topology = topology
        .parse()
        .context("Expected full:N, ring:N, grid:RxC or grid:RxCxL")?;
    let arch = topology.build()?;
    tracing::info!(%topology, nodes = arch.n_nodes(), "generated device");

    match output {
        Some(path) => {
            save_device(&arch, path, out.pretty)?;
            eprintln!(
                "{} Wrote {} ({} nodes, {} connections) to {}",
                style("✓").green().bold(),
                style(topology).yellow(),
                arch.n_nodes(),
                arch.n_connections(),
                style(path).green()
            );
        }
        None => println!("{}", json::to_json_string(&arch, out.pretty)?),
    }

    Ok(())
}
