//! CLI module
//!
//! Command-line interface for computing pagination links.
//!
//! # Commands
//!
//! - `links` - Print the links for a request URL
//! - `config` - Print the effective configuration
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{render_links, Runner};
pub use server::{router, serve, ServerConfig};
