//! Pagination strategy implementations
//!
//! Each strategy maps a position in a result set to query parameters.

use super::types::{Pagination, PagingLink, Relation};
use crate::error::{Error, Result};
use crate::query::{rewrite_query, QueryValues};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Default query parameter for page numbers
pub const DEFAULT_PAGE_PARAM: &str = "page";
/// Default query parameter for offsets
pub const DEFAULT_OFFSET_PARAM: &str = "offset";
/// Default query parameter for limits
pub const DEFAULT_LIMIT_PARAM: &str = "limit";
/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Copy `url` with `pairs` set and wrap it in a link
fn build_link<'a>(
    relation: Relation,
    url: &Url,
    pairs: impl IntoIterator<Item = (&'a str, String)>,
) -> PagingLink {
    let target = rewrite_query(url, pairs);
    tracing::trace!(%relation, url = %target, "Built paging link");
    PagingLink::new(relation, target)
}

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page number pagination
///
/// Common patterns:
/// - `?page=2`
/// - `?p=2` (with a custom parameter name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageNumberPagination {
    /// Query parameter name for page number
    pub page_param: String,
}

impl Default for PageNumberPagination {
    fn default() -> Self {
        Self {
            page_param: DEFAULT_PAGE_PARAM.to_string(),
        }
    }
}

impl PageNumberPagination {
    /// Create a page number strategy reading `page_param`
    pub fn new(page_param: impl Into<String>) -> Self {
        Self {
            page_param: page_param.into(),
        }
    }
}

/// Current page, parsed from a request URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageNumberState {
    /// Current page (1-based)
    pub page: u64,
}

impl Default for PageNumberState {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl Pagination for PageNumberPagination {
    type State = PageNumberState;

    fn parse(&self, url: &Url) -> Result<PageNumberState> {
        let values = QueryValues::from_url(url);
        Ok(PageNumberState {
            page: values.get_int_at_least(&self.page_param, 1, 1),
        })
    }

    fn first_link(&self, url: &Url, _state: &PageNumberState) -> Result<Option<PagingLink>> {
        Ok(Some(build_link(
            Relation::First,
            url,
            [(self.page_param.as_str(), "1".to_string())],
        )))
    }

    fn prev_link(&self, url: &Url, state: &PageNumberState) -> Result<Option<PagingLink>> {
        if state.page < 2 {
            return Ok(None);
        }
        Ok(Some(build_link(
            Relation::Prev,
            url,
            [(self.page_param.as_str(), (state.page - 1).to_string())],
        )))
    }

    fn next_link(&self, url: &Url, state: &PageNumberState) -> Result<Option<PagingLink>> {
        Ok(Some(build_link(
            Relation::Next,
            url,
            [(
                self.page_param.as_str(),
                state.page.saturating_add(1).to_string(),
            )],
        )))
    }

    /// Always `None`: the total page count is unknown here.
    fn last_link(&self, _url: &Url, _state: &PageNumberState) -> Result<Option<PagingLink>> {
        Ok(None)
    }
}

// ============================================================================
// Offset/Limit Pagination
// ============================================================================

/// Offset/limit pagination
///
/// Neighbor links step by the configured page size, and always pin the
/// limit to it, regardless of the limit the client asked for.
/// Common patterns:
/// - `?offset=100&limit=50`
/// - `?skip=100&take=50`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetLimitPagination {
    /// Query parameter name for offset
    pub offset_param: String,
    /// Query parameter name for limit
    pub limit_param: String,
    /// Number of records per page, always > 0
    page_size: u64,
}

impl Default for OffsetLimitPagination {
    fn default() -> Self {
        Self {
            offset_param: DEFAULT_OFFSET_PARAM.to_string(),
            limit_param: DEFAULT_LIMIT_PARAM.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl OffsetLimitPagination {
    /// Create an offset/limit strategy
    pub fn new(
        offset_param: impl Into<String>,
        limit_param: impl Into<String>,
        page_size: u64,
    ) -> Result<Self> {
        Self {
            offset_param: offset_param.into(),
            limit_param: limit_param.into(),
            ..Default::default()
        }
        .with_page_size(page_size)
    }

    /// Set the page size
    pub fn with_page_size(mut self, page_size: u64) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be greater than 0"));
        }
        self.page_size = page_size;
        Ok(self)
    }

    /// Number of records per page
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    fn offset_limit_link(&self, relation: Relation, url: &Url, offset: u64) -> PagingLink {
        build_link(
            relation,
            url,
            [
                (self.offset_param.as_str(), offset.to_string()),
                (self.limit_param.as_str(), self.page_size.to_string()),
            ],
        )
    }
}

/// Offset and limit, parsed from a request URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetLimitState {
    /// Number of records to skip
    pub offset: u64,
    /// Requested number of records
    pub limit: u64,
}

impl Pagination for OffsetLimitPagination {
    type State = OffsetLimitState;

    fn parse(&self, url: &Url) -> Result<OffsetLimitState> {
        let values = QueryValues::from_url(url);
        Ok(OffsetLimitState {
            offset: values.get_int(&self.offset_param, 0),
            limit: values.get_int_at_least(&self.limit_param, 1, self.page_size),
        })
    }

    fn first_link(&self, url: &Url, _state: &OffsetLimitState) -> Result<Option<PagingLink>> {
        Ok(Some(self.offset_limit_link(Relation::First, url, 0)))
    }

    fn prev_link(&self, url: &Url, state: &OffsetLimitState) -> Result<Option<PagingLink>> {
        if state.offset < self.page_size {
            return Ok(None);
        }
        Ok(Some(self.offset_limit_link(
            Relation::Prev,
            url,
            state.offset - self.page_size,
        )))
    }

    fn next_link(&self, url: &Url, state: &OffsetLimitState) -> Result<Option<PagingLink>> {
        Ok(Some(self.offset_limit_link(
            Relation::Next,
            url,
            state.offset.saturating_add(self.page_size),
        )))
    }

    /// Always `None`: the total record count is unknown here.
    fn last_link(&self, _url: &Url, _state: &OffsetLimitState) -> Result<Option<PagingLink>> {
        Ok(None)
    }
}

// ============================================================================
// Strategy Selection
// ============================================================================

/// Which pagination strategy an endpoint uses
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum PaginationKind {
    /// `?page=N`
    #[default]
    #[serde(rename = "page")]
    #[value(name = "page")]
    PageNumber,
    /// `?offset=N&limit=M`
    #[serde(rename = "offset")]
    #[value(name = "offset")]
    OffsetLimit,
}

impl PaginationKind {
    /// Short name used in config files, URLs and the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            PaginationKind::PageNumber => "page",
            PaginationKind::OffsetLimit => "offset",
        }
    }
}

impl fmt::Display for PaginationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaginationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "page" => Ok(PaginationKind::PageNumber),
            "offset" => Ok(PaginationKind::OffsetLimit),
            other => Err(Error::unknown_kind(other)),
        }
    }
}

/// Either strategy, dispatched by variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationStrategy {
    /// Page number pagination
    PageNumber(PageNumberPagination),
    /// Offset/limit pagination
    OffsetLimit(OffsetLimitPagination),
}

impl Default for PaginationStrategy {
    fn default() -> Self {
        Self::PageNumber(PageNumberPagination::default())
    }
}

impl PaginationStrategy {
    /// Default strategy of the given kind
    pub fn of_kind(kind: PaginationKind) -> Self {
        match kind {
            PaginationKind::PageNumber => Self::PageNumber(PageNumberPagination::default()),
            PaginationKind::OffsetLimit => Self::OffsetLimit(OffsetLimitPagination::default()),
        }
    }

    /// Kind of this strategy
    pub fn kind(&self) -> PaginationKind {
        match self {
            Self::PageNumber(_) => PaginationKind::PageNumber,
            Self::OffsetLimit(_) => PaginationKind::OffsetLimit,
        }
    }
}

impl From<PageNumberPagination> for PaginationStrategy {
    fn from(strategy: PageNumberPagination) -> Self {
        Self::PageNumber(strategy)
    }
}

impl From<OffsetLimitPagination> for PaginationStrategy {
    fn from(strategy: OffsetLimitPagination) -> Self {
        Self::OffsetLimit(strategy)
    }
}

/// State parsed by a [`PaginationStrategy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PaginationState {
    /// Page number state
    #[serde(rename = "page")]
    PageNumber(PageNumberState),
    /// Offset/limit state
    #[serde(rename = "offset")]
    OffsetLimit(OffsetLimitState),
}

impl PaginationState {
    /// Kind of the strategy that produced this state
    pub fn kind(&self) -> PaginationKind {
        match self {
            Self::PageNumber(_) => PaginationKind::PageNumber,
            Self::OffsetLimit(_) => PaginationKind::OffsetLimit,
        }
    }
}

macro_rules! dispatch {
    ($self:expr, $state:expr, $method:ident, $url:expr) => {
        match ($self, $state) {
            (PaginationStrategy::PageNumber(p), PaginationState::PageNumber(s)) => {
                p.$method($url, s)
            }
            (PaginationStrategy::OffsetLimit(p), PaginationState::OffsetLimit(s)) => {
                p.$method($url, s)
            }
            (strategy, state) => Err(Error::state_mismatch(
                strategy.kind().as_str(),
                state.kind().as_str(),
            )),
        }
    };
}

impl Pagination for PaginationStrategy {
    type State = PaginationState;

    fn parse(&self, url: &Url) -> Result<PaginationState> {
        match self {
            Self::PageNumber(p) => p.parse(url).map(PaginationState::PageNumber),
            Self::OffsetLimit(p) => p.parse(url).map(PaginationState::OffsetLimit),
        }
    }

    fn first_link(&self, url: &Url, state: &PaginationState) -> Result<Option<PagingLink>> {
        dispatch!(self, state, first_link, url)
    }

    fn prev_link(&self, url: &Url, state: &PaginationState) -> Result<Option<PagingLink>> {
        dispatch!(self, state, prev_link, url)
    }

    fn next_link(&self, url: &Url, state: &PaginationState) -> Result<Option<PagingLink>> {
        dispatch!(self, state, next_link, url)
    }

    fn last_link(&self, url: &Url, state: &PaginationState) -> Result<Option<PagingLink>> {
        dispatch!(self, state, last_link, url)
    }
}
