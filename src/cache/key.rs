//! Cache Key Derivation
//!
//! A cached response is identified by the request's path and query string,
//! independent of method or headers. Two requests with identical path and
//! query always map to the same key.

use axum::http::Uri;

/// Prefix applied to every response-cache key.
pub const KEY_PREFIX: &str = "cache:";

/// Derives the cache key for a request URI.
///
/// The query string is part of the identity: `/listings?page=1` and
/// `/listings?page=2` cache independently.
pub fn request_key(uri: &Uri) -> String {
    match uri.path_and_query() {
        Some(path_and_query) => format!("{}{}", KEY_PREFIX, path_and_query),
        None => format!("{}{}", KEY_PREFIX, uri.path()),
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    #[test]
    fn test_key_includes_prefix_and_path() {
        assert_eq!(request_key(&uri("/listings")), "cache:/listings");
    }

    #[test]
    fn test_key_includes_query_string() {
        assert_eq!(
            request_key(&uri("/listings?city=paris&page=2")),
            "cache:/listings?city=paris&page=2"
        );
    }

    #[test]
    fn test_key_is_deterministic() {
        let a = request_key(&uri("/listings?city=paris"));
        let b = request_key(&uri("/listings?city=paris"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_queries_yield_distinct_keys() {
        let a = request_key(&uri("/listings?page=1"));
        let b = request_key(&uri("/listings?page=2"));
        assert_ne!(a, b);
    }
}
