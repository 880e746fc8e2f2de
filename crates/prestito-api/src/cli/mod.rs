//! CLI command definitions and dispatch for the `presti` binary.
//!
//! Uses clap derive macros. `presti serve` runs the HTTP transport
//! adapter, `presti chat` runs a local console conversation, and
//! `presti render` generates one contract without any conversation.

pub mod chat;
pub mod render;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use std::path::PathBuf;

/// Guided loan-contract generator.
#[derive(Parser)]
#[command(name = "presti", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the configuration file.
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP transport adapter.
    Serve {
        /// Bind address, overriding the configuration file.
        #[arg(long)]
        bind: Option<String>,

        /// Export spans via OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,
    },

    /// Run a conversation in the local console.
    Chat,

    /// Generate one contract directly, without a conversation.
    Render {
        /// Customer full name.
        #[arg(long)]
        name: String,

        /// Loan amount; locale-tolerant (`5000`, `5.000,50`, `€ 5000`).
        #[arg(long)]
        amount: String,

        /// Term in months; defaults to the configured value.
        #[arg(long)]
        term: Option<u32>,

        /// Annual nominal rate (TAN) percent; defaults to the configured value.
        #[arg(long)]
        tan: Option<String>,

        /// Annual percentage rate (TAEG) percent; defaults to the configured value.
        #[arg(long)]
        taeg: Option<String>,

        /// Output path; defaults to the derived contract filename.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}
