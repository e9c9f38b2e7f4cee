//! Matrix command implementation.

use anyhow::Result;
use serde_json::json;

use super::common::{load_device, print_json};
use crate::config::OutputConfig;

/// Execute the matrix command.
pub fn execute(input: &str, out: &OutputConfig) -> Result<()> {
    let arch = load_device(input)?;
    let matrix = arch.connectivity_matrix();

    if out.is_json() {
        let rows: Vec<Vec<bool>> = matrix.rows().into_iter().map(|r| r.to_vec()).collect();
        let nodes: Vec<_> = arch.nodes().collect();
        return print_json(&json!({ "nodes": nodes, "matrix": rows }), out.pretty);
    }

    for (i, node) in arch.nodes().enumerate() {
        println!("  {i:>4}  {node}");
    }
    println!();
    for (i, row) in matrix.rows().into_iter().enumerate() {
        let cells: String = row.iter().map(|&c| if c { '1' } else { '.' }).collect();
        println!("  {i:>4}  {cells}");
    }

    Ok(())
}
