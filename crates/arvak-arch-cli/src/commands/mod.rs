//! CLI command implementations.

pub mod aps;
pub mod common;
pub mod distance;
pub mod generate;
pub mod info;
pub mod lines;
pub mod matrix;
pub mod prune;
