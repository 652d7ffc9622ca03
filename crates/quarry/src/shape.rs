//! Structural classification of collections.

use crate::value::Value;

/// Structural category of a collection, decided once per engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Ordered sequence of items.
    Sequence,
    /// Keyed mapping ([`Value::Map`]); each entry value is a candidate.
    Mapping,
    /// Set of unique items.
    Set,
    /// A single string.
    Text,
    /// A single record, searched as one item.
    ///
    /// JSON objects classify here, never as [`Shape::Mapping`]: their fields
    /// are reached through property paths, not iterated as entries.
    Object,
    /// A single null, boolean or number, searched as one item.
    Scalar,
}

impl Shape {
    /// Classifies a value by its structure.
    pub fn of(value: &Value) -> Shape {
        match value {
            Value::Array(_) => Shape::Sequence,
            Value::Map(_) => Shape::Mapping,
            Value::Set(_) => Shape::Set,
            Value::String(_) => Shape::Text,
            Value::Object(_) => Shape::Object,
            Value::Null | Value::Bool(_) | Value::Number(_) => Shape::Scalar,
        }
    }

    /// Returns `true` for shapes treated as a single item.
    pub fn is_single(self) -> bool {
        matches!(self, Shape::Object | Shape::Scalar)
    }

    /// Returns the display name of this shape.
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Sequence => "sequence",
            Shape::Mapping => "mapping",
            Shape::Set => "set",
            Shape::Text => "text",
            Shape::Object => "object",
            Shape::Scalar => "scalar",
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
