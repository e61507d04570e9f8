//! CLI commands and argument parsing

use crate::pagination::PaginationKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pagination link calculator
#[derive(Parser, Debug)]
#[command(name = "pagelinks")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "header")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the pagination links for a request URL
    Links {
        /// Request URL, including its query string
        #[arg(short, long)]
        url: String,

        /// Pagination strategy (defaults to the configured one)
        #[arg(short, long)]
        kind: Option<PaginationKind>,

        /// Query parameter for page numbers
        #[arg(long)]
        page_param: Option<String>,

        /// Query parameter for offsets
        #[arg(long)]
        offset_param: Option<String>,

        /// Query parameter for limits
        #[arg(long)]
        limit_param: Option<String>,

        /// Items per page (offset/limit only)
        #[arg(long)]
        page_size: Option<u64>,
    },

    /// Print the effective configuration
    Config,

    /// Start HTTP server mode
    Serve {
        /// Port to listen on (overrides the configured address)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `Link` header value
    Header,
    /// JSON object with the parsed state and the links
    Json,
    /// One `rel: url` line per link
    Pretty,
}
