//! Pagination types and traits
//!
//! Defines the link values and the contract shared by all strategies.

use crate::error::{Error, Result};
use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

// ============================================================================
// Link Relation
// ============================================================================

/// Role of a link relative to the current page (RFC 8288)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// First page
    First,
    /// Previous page
    Prev,
    /// Next page
    Next,
    /// Last page
    Last,
}

impl Relation {
    /// All relations, in the order they are emitted
    pub const ALL: [Relation; 4] = [
        Relation::First,
        Relation::Prev,
        Relation::Next,
        Relation::Last,
    ];

    /// The `rel` value for this relation
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::First => "first",
            Relation::Prev => "prev",
            Relation::Next => "next",
            Relation::Last => "last",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "first" => Ok(Relation::First),
            "prev" => Ok(Relation::Prev),
            "next" => Ok(Relation::Next),
            "last" => Ok(Relation::Last),
            other => Err(Error::unknown_relation(other)),
        }
    }
}

// ============================================================================
// Paging Link
// ============================================================================

/// A single navigation link
///
/// Renders as `<https://example.com/items?page=2>; rel="next"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingLink {
    /// Link relation
    #[serde(rename = "rel")]
    pub relation: Relation,
    /// Target URL
    #[serde(rename = "url")]
    pub target: Url,
}

impl PagingLink {
    /// Create a new link
    pub fn new(relation: Relation, target: Url) -> Self {
        Self { relation, target }
    }

    /// Create a `first` link
    pub fn first(target: Url) -> Self {
        Self::new(Relation::First, target)
    }

    /// Create a `prev` link
    pub fn prev(target: Url) -> Self {
        Self::new(Relation::Prev, target)
    }

    /// Create a `next` link
    pub fn next(target: Url) -> Self {
        Self::new(Relation::Next, target)
    }

    /// Create a `last` link
    pub fn last(target: Url) -> Self {
        Self::new(Relation::Last, target)
    }
}

impl fmt::Display for PagingLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>; rel=\"{}\"", self.target, self.relation)
    }
}

// ============================================================================
// Paging Links
// ============================================================================

/// Ordered collection of links, suitable for a `Link` header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PagingLinks(Vec<PagingLink>);

impl PagingLinks {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a link
    pub fn push(&mut self, link: PagingLink) {
        self.0.push(link);
    }

    /// Find the first link with the given relation
    pub fn get(&self, relation: Relation) -> Option<&PagingLink> {
        self.0.iter().find(|link| link.relation == relation)
    }

    /// Iterate over the links in order
    pub fn iter(&self) -> std::slice::Iter<'_, PagingLink> {
        self.0.iter()
    }

    /// Number of links
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no links
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Relations present, in order
    pub fn relations(&self) -> Vec<Relation> {
        self.0.iter().map(|link| link.relation).collect()
    }

    /// Render as an HTTP `Link` header value
    pub fn to_header_value(&self) -> Result<HeaderValue> {
        HeaderValue::from_str(&self.to_string()).map_err(|e| Error::invalid_header(e.to_string()))
    }
}

impl fmt::Display for PagingLinks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, link) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{link}")?;
        }
        Ok(())
    }
}

/// Split a header on the commas that separate links.
///
/// Commas inside a `<...>` target or a quoted parameter value do not count.
fn split_link_values(header: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_target = false;
    let mut in_quotes = false;

    for (i, c) in header.char_indices() {
        match c {
            '<' if !in_quotes => in_target = true,
            '>' if !in_quotes => in_target = false,
            '"' if !in_target => in_quotes = !in_quotes,
            ',' if !in_target && !in_quotes => {
                parts.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&header[start..]);
    parts
}

/// Parse a `Link` header value.
///
/// Segments without a target, with an unknown relation or with an
/// unparseable URL are skipped.
impl FromStr for PagingLinks {
    type Err = Error;

    fn from_str(header: &str) -> Result<Self> {
        let mut links = PagingLinks::new();

        for part in split_link_values(header) {
            let Some((target, params)) = part
                .trim()
                .strip_prefix('<')
                .and_then(|rest| rest.split_once('>'))
            else {
                continue;
            };
            let Some(relation) = params
                .split(';')
                .find_map(|param| param.trim().strip_prefix("rel="))
                .map(|value| value.trim_matches('"').trim_matches('\''))
            else {
                continue;
            };

            match (Url::parse(target), relation.parse::<Relation>()) {
                (Ok(url), Ok(rel)) => links.push(PagingLink::new(rel, url)),
                _ => tracing::debug!(url = target, rel = relation, "Skipping unusable link segment"),
            }
        }

        Ok(links)
    }
}

impl FromIterator<PagingLink> for PagingLinks {
    fn from_iter<I: IntoIterator<Item = PagingLink>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for PagingLinks {
    type Item = PagingLink;
    type IntoIter = std::vec::IntoIter<PagingLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PagingLinks {
    type Item = &'a PagingLink;
    type IntoIter = std::slice::Iter<'a, PagingLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<PagingLink>> for PagingLinks {
    fn from(links: Vec<PagingLink>) -> Self {
        Self(links)
    }
}

// ============================================================================
// Pagination Contract
// ============================================================================

/// Core trait for pagination strategies
///
/// A strategy is immutable configuration (parameter names, page size).
/// [`parse`](Pagination::parse) reads the current position out of a request
/// URL and returns it as a separate `State` value, so one strategy can be
/// shared across concurrently handled requests.
///
/// The `*_for` methods parse the URL themselves before building links.
pub trait Pagination: Send + Sync {
    /// Position parsed from a request URL
    type State: Clone + fmt::Debug + PartialEq;

    /// Read the pagination parameters from the URL's query string
    fn parse(&self, url: &Url) -> Result<Self::State>;

    /// Link to the first page
    fn first_link(&self, url: &Url, state: &Self::State) -> Result<Option<PagingLink>>;

    /// Link to the previous page, if there is one
    fn prev_link(&self, url: &Url, state: &Self::State) -> Result<Option<PagingLink>>;

    /// Link to the next page
    fn next_link(&self, url: &Url, state: &Self::State) -> Result<Option<PagingLink>>;

    /// Link to the last page
    fn last_link(&self, url: &Url, state: &Self::State) -> Result<Option<PagingLink>>;

    /// Link for a single relation
    fn link(
        &self,
        url: &Url,
        state: &Self::State,
        relation: Relation,
    ) -> Result<Option<PagingLink>> {
        match relation {
            Relation::First => self.first_link(url, state),
            Relation::Prev => self.prev_link(url, state),
            Relation::Next => self.next_link(url, state),
            Relation::Last => self.last_link(url, state),
        }
    }

    /// All applicable links, in `first, prev, next, last` order
    fn links(&self, url: &Url, state: &Self::State) -> Result<PagingLinks> {
        let mut links = PagingLinks::new();
        for relation in Relation::ALL {
            if let Some(link) = self.link(url, state, relation)? {
                links.push(link);
            }
        }
        Ok(links)
    }

    /// Parse `url`, then build the link for a single relation
    fn link_for(&self, url: &Url, relation: Relation) -> Result<Option<PagingLink>> {
        let state = self.parse(url)?;
        self.link(url, &state, relation)
    }

    /// Parse `url`, then build all applicable links
    fn links_for(&self, url: &Url) -> Result<PagingLinks> {
        let state = self.parse(url)?;
        self.links(url, &state)
    }
}
