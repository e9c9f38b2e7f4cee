//! Info command implementation.

use anyhow::Result;
use console::style;
use serde_json::json;

use arvak_arch::{ArchError, Topology};

use super::common::{join_nodes, load_device, print_json};
use crate::config::OutputConfig;

/// Execute the info command.
pub fn execute(input: &str, out: &OutputConfig) -> Result<()> {
    let arch = load_device(input)?;

    let min_nodes = arch.min_degree_nodes();
    let max_nodes = arch.max_degree_nodes();
    let min_degree = min_nodes.first().map(|n| arch.degree(n)).transpose()?;
    let max_degree = max_nodes.first().map(|n| arch.degree(n)).transpose()?;
    let diameter = match arch.diameter() {
        Ok(d) => Some(d),
        Err(ArchError::EmptyArchitecture | ArchError::Unreachable { .. }) => None,
        Err(e) => return Err(e.into()),
    };
    let topology = Topology::identify(&arch);
    let aps = arch.articulation_points();

    if out.is_json() {
        return print_json(
            &json!({
                "nodes": arch.n_nodes(),
                "connections": arch.n_connections(),
                "undirected_edges": arch.undirected().edge_count(),
                "min_degree": min_degree,
                "max_degree": max_degree,
                "diameter": diameter,
                "connected": diameter.is_some(),
                "topology": topology.map(|t| t.to_string()),
                "articulation_points": aps.len(),
            }),
            out.pretty,
        );
    }

    println!("{} Device {}", style("→").cyan().bold(), style(input).green());
    println!("  Nodes:        {}", arch.n_nodes());
    println!(
        "  Connections:  {} ({} undirected)",
        arch.n_connections(),
        arch.undirected().edge_count()
    );
    if let (Some(lo), Some(hi)) = (min_degree, max_degree) {
        println!("  Degree:       {lo}..{hi}");
        println!("  Min degree:   {}", join_nodes(&min_nodes));
    }
    match diameter {
        Some(d) => println!("  Diameter:     {d}"),
        None => println!("  Diameter:     {}", style("disconnected").red()),
    }
    println!("  Cut vertices: {}", aps.len());
    if let Some(t) = topology {
        println!("  Topology:     {}", style(t).yellow());
    }

    Ok(())
}
