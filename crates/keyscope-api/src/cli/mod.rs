//! CLI command definitions for the `keyscope` binary.
//!
//! Uses clap derive macros for argument parsing. Every key command goes through
//! the same console service as the REST API, so the terminal and the browser
//! see identical results.

pub mod keys;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Browse and edit a Redis keyspace from the terminal or the browser.
#[derive(Parser)]
#[command(name = "keyscope", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the config file (default: ~/.keyscope/config.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web console and REST API server.
    Serve {
        /// Port to listen on (default: `[server] port`).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (default: `[server] host`).
        #[arg(long)]
        host: Option<String>,
    },

    /// List keys containing a search term.
    #[command(alias = "ls")]
    Keys {
        /// Substring to look for in key names.
        #[arg(short, long)]
        search: Option<String>,

        /// Maximum number of keys to return.
        #[arg(short, long)]
        limit: Option<i64>,

        /// Also show each key's value.
        #[arg(long)]
        values: bool,
    },

    /// Show the value stored at a key.
    Get {
        /// Key name.
        key: String,
    },

    /// Create or overwrite a string value.
    Set {
        /// Key name.
        key: String,

        /// Value to store.
        value: String,
    },

    /// Delete a key.
    #[command(alias = "rm")]
    Delete {
        /// Key name.
        key: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
