// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # pagelinks
//!
//! Pagination links for paginated HTTP APIs.
//!
//! Given the URL of the current request, derives the `first`, `prev` and
//! `next` links an endpoint should expose, and renders them as an RFC 8288
//! `Link` header value.
//!
//! ## Features
//!
//! - **Page Number Pagination**: `?page=3`
//! - **Offset/Limit Pagination**: `?offset=100&limit=50`
//! - **Link Header Output**: `<...?page=2>; rel="prev",<...?page=4>; rel="next"`
//! - **HTTP Server Mode**: compute links over HTTP, errors as RFC 7807 problems
//!
//! ## Quick Start
//!
//! ```rust
//! use pagelinks::pagination::{OffsetLimitPagination, Pagination};
//! use url::Url;
//!
//! let url = Url::parse("https://api.example.com/items?offset=100&limit=50").unwrap();
//! let strategy = OffsetLimitPagination::default();
//!
//! let state = strategy.parse(&url).unwrap();
//! let links = strategy.links(&url, &state).unwrap();
//! assert_eq!(links.len(), 3);
//! ```
//!
//! ## Concurrency
//!
//! Strategies are immutable configuration; `parse` returns the request's
//! position as a separate value. A single strategy can be shared between
//! concurrently handled requests.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Query string helpers
pub mod query;

/// Pagination strategies and link types
pub mod pagination;

/// Configuration loading
pub mod config;

/// RFC 7807 problem details
pub mod problem;

/// Command-line interface and HTTP server
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use pagination::{
    OffsetLimitPagination, PageNumberPagination, Pagination, PaginationKind, PaginationState,
    PaginationStrategy, PagingLink, PagingLinks, Relation,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
