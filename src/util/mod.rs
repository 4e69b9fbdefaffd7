//! Utility functions shared across the application.

mod secret;

pub use secret::SecretString;

use std::fmt::Display;

/// Builder for URL query parameters.
///
/// Values are percent-encoded as they are added.
///
/// # Example
/// ```ignore
/// let query = QueryBuilder::new()
///     .param("page", 1)
///     .param("scope", "all")
///     .build();
/// // Returns "?page=1&scope=all"
/// ```
#[derive(Default)]
pub struct QueryBuilder {
    params: Vec<(String, String)>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required parameter (always included).
    pub fn param(mut self, key: &str, value: impl Display) -> Self {
        self.params.push((
            key.to_string(),
            urlencoding::encode(&value.to_string()).into_owned(),
        ));
        self
    }

    /// Build the query string.
    ///
    /// Returns an empty string if no parameters were added,
    /// otherwise returns "?key1=value1&key2=value2...".
    pub fn build(self) -> String {
        if self.params.is_empty() {
            String::new()
        } else {
            format!(
                "?{}",
                self.params
                    .into_iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>()
                    .join("&")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder_empty() {
        assert_eq!(QueryBuilder::new().build(), "");
    }

    #[test]
    fn test_query_builder_encodes_values() {
        let query = QueryBuilder::new()
            .param("created_after", "2025-01-01T00:00:00Z")
            .param("page", 2)
            .param("scope", "all")
            .build();
        assert_eq!(
            query,
            "?created_after=2025-01-01T00%3A00%3A00Z&page=2&scope=all"
        );
    }
}
