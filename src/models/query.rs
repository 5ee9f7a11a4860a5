use std::fmt;

/// A user-supplied search string, trimmed on construction
///
/// Matching is case-insensitive substring containment. An empty query is "no active
/// search" and matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `name` contains this query, ignoring case
    pub fn matches(&self, name: &str) -> bool {
        !self.is_empty() && name.to_uppercase().contains(&self.0.to_uppercase())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Query {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
