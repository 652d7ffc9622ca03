//! Quarry - polymorphic in-memory query engine.
//!
//! Quarry searches an arbitrary collection for the elements that satisfy a
//! match rule. It supports:
//!
//! - Any collection shape: sequences, keyed mappings, single strings, records
//!   and scalars (sets are classified but not yet searchable)
//! - Four match modes: exact, substring, regex and inclusive numeric range
//! - Case-insensitive matching by default, literal matching on request
//! - Nested property paths such as `user.profile.name`
//! - An eager, resettable case-normalized copy of the collection
//!
//! # Quick Start
//!
//! ```rust
//! use quarry::{Mode, Options, QueryEngine, Value};
//! use serde_json::json;
//!
//! let people = Value::from(json!([
//!     {"name": "John", "age": 20},
//!     {"name": "Jane", "age": 30},
//! ]));
//! let engine = QueryEngine::new(&people);
//!
//! let johns = engine
//!     .search("John", Some("name"), &Options::new().case_sensitive(true))
//!     .unwrap();
//! assert_eq!(johns.len(), 1);
//!
//! let twenties = engine
//!     .search((20, 29), Some("age"), &Options::new().mode(Mode::Range))
//!     .unwrap();
//! assert_eq!(twenties[0].value(), johns[0].value());
//! ```
//!
//! # Search Semantics
//!
//! | Shape | Searched as | Hit |
//! |-------|-------------|-----|
//! | Sequence | each item, in order | `Match::Item` |
//! | Mapping | each entry value, in order | `Match::Entry` |
//! | Text | the whole string | `Match::Text` fragments |
//! | Object / Scalar | one item | `Match::Item` |
//! | Set | not supported | `UnsupportedShape` error |
//!
//! A property path that does not resolve on an item never matches, whatever
//! the mode. Errors are raised before scanning whenever possible, and a
//! failed search never returns partial results.

mod cache;
mod engine;
mod error;
mod options;
mod path;
mod shape;
mod strategy;
mod value;

// Re-export public API
pub use cache::{CacheState, NormalizedCache};
pub use engine::{Match, QueryEngine};
pub use error::{QuarryError, Result};
pub use options::{Mode, Options};
pub use path::{resolve, PropertyPath};
pub use shape::Shape;
pub use strategy::{matches, CasePolicy, Predicate};
pub use value::{fold_text, Number, Value};
