//! Query string helpers
//!
//! Decodes a URL query into a sorted, multi-valued parameter map and
//! re-encodes it after pagination parameters have been rewritten.
//!
//! Re-encoding normalizes the query: keys come out sorted and a bare flag
//! such as `?debug` comes back as `?debug=`. Existing clients compare link
//! targets against that normalized form, so it must not change.
//!
//! Keys and values are kept as raw bytes. An escape that is not valid UTF-8
//! (`%FF`) survives a rewrite unchanged, and a pair with a malformed escape
//! (`%zz`) is dropped.

use percent_encoding::percent_decode;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;
use url::form_urlencoded;
use url::Url;

/// Decoded query parameters, keyed in byte order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryValues {
    values: BTreeMap<Vec<u8>, Vec<Vec<u8>>>,
}

impl QueryValues {
    /// Decode the query string of a URL
    pub fn from_url(url: &Url) -> Self {
        url.query().map(Self::parse).unwrap_or_default()
    }

    /// Decode a raw `application/x-www-form-urlencoded` query string
    pub fn parse(raw: &str) -> Self {
        let mut values: BTreeMap<Vec<u8>, Vec<Vec<u8>>> = BTreeMap::new();
        for pair in raw.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match (unescape(key), unescape(value)) {
                (Some(key), Some(value)) => values.entry(key).or_default().push(value),
                _ => tracing::debug!(pair, "Dropping query pair with malformed escape"),
            }
        }
        Self { values }
    }

    /// First value for a key, if it is valid UTF-8
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key.as_bytes())
            .and_then(|vs| vs.first())
            .and_then(|v| std::str::from_utf8(v).ok())
    }

    /// Parse the first value for a key as an integer.
    ///
    /// Absent and non-numeric values yield `default`.
    pub fn get_int<T>(&self, key: &str, default: T) -> T
    where
        T: FromStr + Display + Copy,
    {
        match self.get(key).map(|raw| (raw, raw.parse::<T>())) {
            Some((_, Ok(value))) => value,
            Some((raw, Err(_))) => {
                tracing::debug!(key, raw, %default, "Non-numeric query value, using default");
                default
            }
            None => default,
        }
    }

    /// Like [`get_int`](Self::get_int), but values below `min` also yield `default`
    pub fn get_int_at_least<T>(&self, key: &str, min: T, default: T) -> T
    where
        T: FromStr + Display + PartialOrd + Copy,
    {
        let value = self.get_int(key, default);
        if value < min {
            tracing::debug!(key, %value, %min, %default, "Query value below minimum, using default");
            default
        } else {
            value
        }
    }

    /// Replace all values of a key with a single value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .insert(key.into().into_bytes(), vec![value.into().into_bytes()]);
    }

    /// Encode as a query string, sorted by key
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (key, values) in &self.values {
            for value in values {
                if !out.is_empty() {
                    out.push('&');
                }
                out.extend(form_urlencoded::byte_serialize(key));
                out.push('=');
                out.extend(form_urlencoded::byte_serialize(value));
            }
        }
        out
    }
}

/// Decode one form-encoded component, `None` if an escape is malformed
fn unescape(raw: &str) -> Option<Vec<u8>> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while let Some(offset) = bytes[i..].iter().position(|&b| b == b'%') {
        let at = i + offset;
        match bytes.get(at + 1..at + 3) {
            Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i = at + 3,
            _ => return None,
        }
    }

    let plus_as_space: Vec<u8> = bytes
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    Some(percent_decode(&plus_as_space).collect())
}

/// Copy `url`, setting each `(key, value)` pair in its query.
///
/// The caller's URL is left untouched; only the query of the copy changes.
pub fn rewrite_query<K, V>(url: &Url, pairs: impl IntoIterator<Item = (K, V)>) -> Url
where
    K: Into<String>,
    V: Into<String>,
{
    let mut values = QueryValues::from_url(url);
    for (key, value) in pairs {
        values.set(key, value);
    }

    let mut copy = url.clone();
    let encoded = values.encode();
    if encoded.is_empty() {
        copy.set_query(None);
    } else {
        copy.set_query(Some(&encoded));
    }
    copy
}
