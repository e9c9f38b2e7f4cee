//! Arvak Architecture Tool
//!
//! Generates canonical device descriptions and runs the graph analyses used
//! by layout and routing (distances, lines, articulation points, pruning) on
//! device description files.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{aps, distance, generate, info, lines, matrix, prune};
use config::{CliConfig, LoggingConfig};

/// Arvak device architecture tools
#[derive(Parser)]
#[command(name = "arvak-arch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (YAML)
    #[arg(long, env = "ARVAK_ARCH_CONFIG", global = true)]
    config: Option<String>,

    /// Result format (table, json), overrides the configuration
    #[arg(long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the device description of a canonical topology
    Generate {
        /// Topology (full:N, ring:N, grid:RxC, grid:RxCxL)
        topology: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Summarise a device
    Info {
        /// Device description file
        #[arg(short, long)]
        input: String,
    },

    /// Shortest distance and path between two nodes
    Distance {
        /// Device description file
        #[arg(short, long)]
        input: String,

        /// Start node, e.g. ringNode[3] or 3
        from: String,

        /// End node
        to: String,
    },

    /// Decompose a device into disjoint lines
    Lines {
        /// Device description file
        #[arg(short, long)]
        input: String,

        /// Requested line lengths
        #[arg(required = true)]
        lengths: Vec<usize>,
    },

    /// Articulation points of a device or of a sub-device
    Aps {
        /// Device description file
        #[arg(short, long)]
        input: String,

        /// Sub-device description; reports its critical nodes within the device
        #[arg(long)]
        sub: Option<String>,
    },

    /// Remove the least useful nodes of a device
    Prune {
        /// Device description file
        #[arg(short, long)]
        input: String,

        /// Number of nodes to remove
        #[arg(short = 'n', long)]
        num: usize,

        /// Write the pruned device to this file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the connectivity matrix
    Matrix {
        /// Device description file
        #[arg(short, long)]
        input: String,
    },
}

fn init_logging(verbose: u8, logging: &LoggingConfig) {
    let level = match verbose {
        0 => logging.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // RUST_LOG takes precedence over flags and configuration.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(cli: &Cli) -> Result<CliConfig, config::ConfigError> {
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(format) = &cli.format {
        config.output.format.clone_from(format);
        config.validate()?;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    init_logging(cli.verbose, &config.logging);
    tracing::debug!(?config, "configuration loaded");

    let output = &config.output;
    let result = match cli.command {
        Commands::Generate {
            topology,
            output: path,
        } => generate::execute(&topology, path.as_deref(), output),

        Commands::Info { input } => info::execute(&input, output),

        Commands::Distance { input, from, to } => distance::execute(&input, &from, &to, output),

        Commands::Lines { input, lengths } => lines::execute(
            &input,
            &lengths,
            config.analysis.max_line_search_nodes,
            output,
        ),

        Commands::Aps { input, sub } => aps::execute(&input, sub.as_deref(), output),

        Commands::Prune {
            input,
            num,
            output: path,
        } => prune::execute(&input, num, path.as_deref(), output),

        Commands::Matrix { input } => matrix::execute(&input, output),
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
