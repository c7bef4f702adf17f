//! Request DTOs for the cache administration API

use serde::Deserialize;

/// Query parameters for the key listing endpoint (GET /keys)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeysQuery {
    /// Glob pattern to filter keys; every key when omitted
    #[serde(default)]
    pub pattern: Option<String>,
}

impl KeysQuery {
    /// Resolves the effective pattern, defaulting to match-everything.
    pub fn pattern_or_default(&self) -> &str {
        self.pattern.as_deref().unwrap_or("*")
    }

    /// Validates the supplied pattern.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match &self.pattern {
            Some(pattern) if pattern.is_empty() => {
                Some("pattern must not be empty".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_pattern() {
        let query: KeysQuery = serde_json::from_str(r#"{"pattern": "cache:*"}"#).unwrap();
        assert_eq!(query.pattern_or_default(), "cache:*");
        assert!(query.validate().is_none());
    }

    #[test]
    fn test_default_pattern_matches_everything() {
        let query = KeysQuery::default();
        assert_eq!(query.pattern_or_default(), "*");
        assert!(query.validate().is_none());
    }

    #[test]
    fn test_empty_pattern_is_invalid() {
        let query = KeysQuery {
            pattern: Some(String::new()),
        };
        assert!(query.validate().is_some());
    }
}
