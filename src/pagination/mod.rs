//! Pagination module
//!
//! Supports: Page Number, Offset/Limit
//!
//! # Overview
//!
//! Given the URL of the current request, each strategy derives the
//! navigation links (`first`, `prev`, `next`) a paginated endpoint should
//! expose. Only pagination parameters are rewritten; the rest of the URL is
//! carried over. A `last` link is never produced because the total count of
//! results is not known here.
//!
//! ```rust
//! use pagelinks::pagination::{Pagination, PageNumberPagination};
//! use url::Url;
//!
//! let url = Url::parse("https://api.example.com/items?page=3").unwrap();
//! let links = PageNumberPagination::default().links_for(&url).unwrap();
//! assert_eq!(
//!     links.to_string(),
//!     "<https://api.example.com/items?page=1>; rel=\"first\",\
//!      <https://api.example.com/items?page=2>; rel=\"prev\",\
//!      <https://api.example.com/items?page=4>; rel=\"next\""
//! );
//! ```

mod strategies;
mod types;

pub use strategies::{
    OffsetLimitPagination, OffsetLimitState, PageNumberPagination, PageNumberState,
    PaginationKind, PaginationState, PaginationStrategy, DEFAULT_LIMIT_PARAM,
    DEFAULT_OFFSET_PARAM, DEFAULT_PAGE_PARAM, DEFAULT_PAGE_SIZE,
};
pub use types::{Pagination, PagingLink, PagingLinks, Relation};
