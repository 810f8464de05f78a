//! Order-preserving, case-insensitive header map.

use indexmap::IndexMap;

/// An HTTP header map with case-insensitive names and stable emission order.
///
/// Names are unique ignoring ASCII case. Insertion order is preserved for
/// emission; overwriting an existing header keeps its first-seen name casing
/// and its position, so rewriting a value in place does not reorder the
/// response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    // Keyed on the lower-cased name; the entry keeps the casing the header
    // first arrived with.
    entries: IndexMap<String, (String, String)>,
}

impl HeaderSet {
    /// Creates an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a header set from `(name, value)` pairs, preserving pair order.
    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        let mut set = Self::new();
        for (name, value) in pairs {
            set.insert(name.into(), value.into());
        }
        set
    }

    /// Inserts or overwrites a header.
    ///
    /// A header whose name is already present (ignoring case) keeps its
    /// original casing and position and only the value changes.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let key = name.to_ascii_lowercase();
        match self.entries.get_mut(&key) {
            Some(entry) => entry.1 = value.into(),
            None => {
                self.entries.insert(key, (name, value.into()));
            }
        }
    }

    /// Returns the value for `name`, matching case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(|(_, value)| value.as_str())
    }

    /// Removes a header, returning its value if it was present.
    ///
    /// Removal preserves the relative order of the remaining headers.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries
            .shift_remove(&name.to_ascii_lowercase())
            .map(|(_, value)| value)
    }

    /// Whether a header with this name is present, ignoring case.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_ascii_lowercase())
    }

    /// Iterates `(name, value)` pairs in insertion order with original casing.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of headers in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no headers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
