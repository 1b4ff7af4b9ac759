//! Primitive types and newtypes for type-safe API interactions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A strongly-typed movie identifier.
///
/// # Example
///
/// ```
/// use theoneapi_rs::MovieId;
///
/// let id = MovieId::new("5cd95395de30eff6ebccde56");
/// assert_eq!(id.to_string(), "5cd95395de30eff6ebccde56");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(String);

impl MovieId {
    /// Create a new movie ID from a string.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the movie ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for MovieId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for MovieId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MovieId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&MovieId> for MovieId {
    fn from(id: &MovieId) -> Self {
        id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_id() {
        let id: MovieId = "5cd95395de30eff6ebccde5b".into();
        assert_eq!(id.as_str(), "5cd95395de30eff6ebccde5b");
        assert_eq!(MovieId::from(&id), id);
    }

    #[test]
    fn test_movie_id_serde_transparent() {
        let id = MovieId::new("abc");
        assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!("abc"));
    }
}
