//! The request being diagnosed.
//!
//! # Design Decisions
//! - Read-only once constructed; routers only borrow it
//! - Method is normalized to upper case so method filters compare exactly
//! - Query parameters keep their first occurrence

use std::collections::BTreeMap;
use std::fmt;

use url::Url;

/// A single incoming HTTP request (method and absolute URL).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    method: String,
    url: Url,
}

impl HttpRequest {
    /// Create a request from a method and an already parsed URL.
    pub fn new(method: impl AsRef<str>, url: Url) -> Self {
        Self {
            method: method.as_ref().to_ascii_uppercase(),
            url,
        }
    }

    /// Parse `url` and create a request.
    pub fn parse(method: impl AsRef<str>, url: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(method, Url::parse(url)?))
    }

    /// Shorthand for a GET request.
    pub fn get(url: &str) -> Result<Self, url::ParseError> {
        Self::parse("GET", url)
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Percent-encoded path, always starting with `/`.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Decoded query parameters.
    pub fn query(&self) -> BTreeMap<String, String> {
        let mut query = BTreeMap::new();
        for (key, value) in self.url.query_pairs() {
            query
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
        query
    }
}

impl fmt::Display for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}
