//! Property paths and nested value resolution.
//!
//! A [`PropertyPath`] addresses a field inside an item, such as
//! `user.profile.name`. Traversal into nested values is opt-in: without
//! `deep`, the dotted string is a single literal key.

use crate::value::Value;

/// Parsed property path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    segments: Vec<String>,
}

impl PropertyPath {
    /// Parses a path.
    ///
    /// With `deep`, the path is split on `.` into ordered segments. Without
    /// it, the whole string is one key.
    ///
    /// ```
    /// use quarry::PropertyPath;
    ///
    /// assert_eq!(PropertyPath::parse("a.b", true).segments(), ["a", "b"]);
    /// assert_eq!(PropertyPath::parse("a.b", false).segments(), ["a.b"]);
    /// ```
    pub fn parse(path: &str, deep: bool) -> Self {
        let segments = if deep {
            path.split('.').map(str::to_string).collect()
        } else {
            vec![path.to_string()]
        };
        PropertyPath { segments }
    }

    /// The ordered keys this path walks through.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Resolves this path against an item.
    ///
    /// Returns `None` (absent) as soon as a step is missing or the current
    /// value cannot be indexed. Records are indexed by field name, mappings
    /// by text key and arrays by decimal position.
    pub fn resolve<'v>(&self, item: &'v Value) -> Option<&'v Value> {
        self.segments
            .iter()
            .try_fold(item, |current, segment| step(current, segment))
    }
}

fn step<'v>(current: &'v Value, segment: &str) -> Option<&'v Value> {
    match current {
        Value::Object(_) | Value::Map(_) => current.get(segment),
        Value::Array(items) => {
            let index: usize = segment.parse().ok()?;
            items.get(index)
        }
        _ => None,
    }
}

/// Resolves `path` against `item`, parsing it with the given `deep` flag.
pub fn resolve<'v>(item: &'v Value, path: &str, deep: bool) -> Option<&'v Value> {
    PropertyPath::parse(path, deep).resolve(item)
}
