//! wirebox - Entry Point
//!
//! Binary entry point for the wirebox CLI. Thin dispatch over the facade
//! crate's `run_*` functions; all engine work happens behind them.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for wirebox
#[derive(Parser, Debug)]
#[command(name = "wirebox")]
#[command(about = "Declarative configuration and dependency-resolution engine")]
#[command(version)]
struct Cli {
    /// Path to the project file (defaults to wirebox.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the hierarchy and configuration and report what was declared
    Check,

    /// Export the binding graph as Graphviz DOT
    Export {
        /// Draw implements-edges for every known implementation, not just
        /// externally-constructed ones
        #[arg(long)]
        show_impls: bool,

        /// Omit the legend cluster
        #[arg(long)]
        no_legend: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resolve an instance of a class and print it
    Resolve {
        /// Fully-qualified class name to resolve
        target: String,
    },

    /// Write a sample project file
    Init {
        /// Destination path
        #[arg(short, long, default_value = "wirebox.toml")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Check => wirebox::run_check(cli.config.as_deref()),
        Command::Export {
            show_impls,
            no_legend,
            output,
        } => wirebox::run_export(
            cli.config.as_deref(),
            show_impls,
            !no_legend,
            output.as_deref(),
        ),
        Command::Resolve { target } => wirebox::run_resolve(cli.config.as_deref(), &target),
        Command::Init { output } => wirebox::run_init(&output),
    }
}
