//! URL splitting and percent-decoding
//!
//! Everything here feeds the matcher: paths and patterns are reduced to
//! segment lists with one shared rule, and query strings are merged over
//! path captures only after matching has finished.

use crate::{Error, Result};
use percent_encoding::percent_decode_str;
use std::collections::HashMap;

/// Split a URL at the first `?` into path and optional query string.
pub(crate) fn split_query(url: &str) -> (&str, Option<&str>) {
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

/// Split a path or pattern into its non-empty segments.
///
/// Splits on `/` and `#` (hash-based navigation prefixes are transparently
/// stripped), so ``, `/` and `#` all produce zero segments and
/// leading/trailing/doubled slashes are insignificant.
pub(crate) fn segments(path: &str) -> Vec<&str> {
    path.split(['/', '#']).filter(|s| !s.is_empty()).collect()
}

/// Percent-decode one URL component.
///
/// Malformed `%` sequences pass through verbatim; decoded bytes that are
/// not valid UTF-8 are an error.
pub(crate) fn decode(raw: &str) -> Result<String> {
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => Ok(decoded.into_owned()),
        Err(source) => Err(Error::Decode {
            input: raw.to_string(),
            source,
        }),
    }
}

/// Parse a query string and merge it over `params`.
///
/// Pairs split on the first `=`; pairs without one are skipped. A query key
/// that collides with a path capture overrides it.
pub(crate) fn parse_query(query: &str, params: &mut HashMap<String, String>) -> Result<()> {
    for pair in query.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            params.insert(decode(key)?, decode(value)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_query() {
        assert_eq!(split_query("a/b?x=1"), ("a/b", Some("x=1")));
        assert_eq!(split_query("a/b"), ("a/b", None));
        // Only the first `?` separates; the rest belongs to the query
        assert_eq!(split_query("a?x=1?y=2"), ("a", Some("x=1?y=2")));
        assert_eq!(split_query("a?"), ("a", Some("")));
    }

    #[test]
    fn test_segments() {
        assert_eq!(segments("a/b/c"), vec!["a", "b", "c"]);
        assert_eq!(segments("/a//b/"), vec!["a", "b"]);
        assert_eq!(segments("#/users/1"), vec!["users", "1"]);
        assert!(segments("").is_empty());
        assert!(segments("/").is_empty());
        assert!(segments("#").is_empty());
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode("a%20b").unwrap(), "a b");
        assert_eq!(decode("%2Fa%2Fb%3Fc").unwrap(), "/a/b?c");
        // Malformed sequences pass through untouched
        assert_eq!(decode("100%").unwrap(), "100%");
        assert_eq!(decode("%zz").unwrap(), "%zz");
        // Decoded non-UTF-8 is an error
        assert!(matches!(decode("%FF"), Err(Error::Decode { .. })));
    }

    #[test]
    fn test_parse_query() {
        let mut params = HashMap::new();
        params.insert("x".to_string(), "path".to_string());
        parse_query("x=query&y=%2Fa%2Fb%3Fc&flag", &mut params).unwrap();
        // Query overrides the path capture; `=`-less pairs are skipped
        assert_eq!(params.get("x"), Some(&"query".to_string()));
        assert_eq!(params.get("y"), Some(&"/a/b?c".to_string()));
        assert!(!params.contains_key("flag"));
    }

    #[test]
    fn test_parse_query_bad_encoding() {
        let mut params = HashMap::new();
        assert!(parse_query("k=%FF", &mut params).is_err());
    }
}
