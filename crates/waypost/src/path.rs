//! Route string parsing.
//!
//! A route string is an absolute URL with a scheme and a host, such as
//! `app://detail/photos?id=42`. Parsing yields the route key used to look up
//! a registered factory (`scheme://host/path`, query and fragment stripped)
//! and the query parameters handed to the factory.

use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
};

use thiserror::Error;
use url::Url;

/// Normalized identity of a route: `scheme://host` followed by the path.
///
/// Keys are compared exactly, so `app://detail` and `app://detail/` are
/// different routes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteKey(String);

impl RouteKey {
    /// Borrow the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RouteKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reasons a route string is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not an absolute URL.
    #[error("malformed route '{route}': {reason}")]
    Malformed {
        /// The rejected input.
        route: String,
        /// Parser diagnostic.
        reason: String,
    },
    /// Parsed as a URL but carries no host component.
    #[error("route '{route}' has no host")]
    MissingHost {
        /// The rejected input.
        route: String,
    },
}

/// Result of parsing a route string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedPath {
    /// Lookup key for the route table.
    pub key: RouteKey,
    /// Query parameters, last value wins for repeated names.
    pub params: BTreeMap<String, String>,
}

/// Parse a route string into its key and query parameters.
pub fn parse(route: &str) -> Result<ParsedPath, ParseError> {
    let url = Url::parse(route).map_err(|e| ParseError::Malformed {
        route: route.to_string(),
        reason: e.to_string(),
    })?;
    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| ParseError::MissingHost {
            route: route.to_string(),
        })?;
    let key = RouteKey(format!("{}://{}{}", url.scheme(), host, url.path()));
    let params = url.query().map(parse_query).unwrap_or_default();
    Ok(ParsedPath { key, params })
}

/// Parse only the route key, ignoring any query.
pub fn key_of(route: &str) -> Result<RouteKey, ParseError> {
    parse(route).map(|p| p.key)
}

/// Parse a raw (still percent-encoded) query string.
///
/// Pieces without `=` carry no value and are dropped. `name=` keeps an empty
/// value. Names and values are percent-decoded; `+` is left as is.
pub fn parse_query(query: &str) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    for piece in query.split('&') {
        let Some((name, value)) = piece.split_once('=') else {
            continue;
        };
        let (Ok(name), Ok(value)) = (urlencoding::decode(name), urlencoding::decode(value)) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        params.insert(name.into_owned(), value.into_owned());
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(route: &str) -> String {
        parse(route).unwrap().key.to_string()
    }

    #[test]
    fn key_includes_path() {
        assert_eq!(key("app://detail"), "app://detail");
        assert_eq!(key("app://detail/a"), "app://detail/a");
        assert_ne!(key("app://detail/a"), key("app://detail/b"));
    }

    #[test]
    fn key_is_trailing_slash_sensitive() {
        assert_ne!(key("app://detail"), key("app://detail/"));
    }

    #[test]
    fn key_preserves_host_case() {
        assert_ne!(key("app://Detail"), key("app://detail"));
    }

    #[test]
    fn query_and_fragment_do_not_affect_key() {
        assert_eq!(key("app://detail?id=1#top"), "app://detail");
    }

    #[test]
    fn repeated_params_last_wins() {
        let parsed = parse("app://detail?id=42&id=43").unwrap();
        assert_eq!(parsed.params.get("id").map(String::as_str), Some("43"));
        assert_eq!(parsed.params.len(), 1);
    }

    #[test]
    fn valueless_params_are_dropped() {
        let parsed = parse("app://detail?flag&empty=&name=x").unwrap();
        assert!(!parsed.params.contains_key("flag"));
        assert_eq!(parsed.params.get("empty").map(String::as_str), Some(""));
        assert_eq!(parsed.params.get("name").map(String::as_str), Some("x"));
    }

    #[test]
    fn params_are_percent_decoded() {
        let parsed = parse("app://search?q=hello%20world&tag=a+b").unwrap();
        assert_eq!(parsed.params["q"], "hello world");
        assert_eq!(parsed.params["tag"], "a+b");
    }

    #[test]
    fn rejects_relative_and_hostless_routes() {
        assert!(matches!(
            parse("detail?id=1"),
            Err(ParseError::Malformed { .. })
        ));
        assert!(matches!(
            parse("app:detail"),
            Err(ParseError::MissingHost { .. })
        ));
        assert!(parse("").is_err());
    }
}
