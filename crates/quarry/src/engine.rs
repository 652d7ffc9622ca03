//! Query engine: shape dispatch over a borrowed collection.
//!
//! A [`QueryEngine`] is built once per collection and answers any number of
//! searches. Each search validates its options, compiles the predicate, then
//! scans the collection once in source order.

use crate::cache::{CacheState, NormalizedCache};
use crate::error::{QuarryError, Result};
use crate::options::Options;
use crate::path::PropertyPath;
use crate::shape::Shape;
use crate::strategy::{CasePolicy, Predicate};
use crate::value::Value;

/// A single search hit.
///
/// Hits borrow from the engine's source collection, never from the
/// normalized cache.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Match<'a> {
    /// An item of a sequence, or the whole object/scalar.
    Item(&'a Value),
    /// A mapping entry whose value matched.
    Entry { key: &'a Value, value: &'a Value },
    /// A matched part of a text collection.
    Text(&'a str),
}

impl<'a> Match<'a> {
    /// The matched item, or the value of a matched entry.
    pub fn value(&self) -> Option<&'a Value> {
        match *self {
            Match::Item(value) | Match::Entry { value, .. } => Some(value),
            Match::Text(_) => None,
        }
    }

    /// The key of a matched entry.
    pub fn key(&self) -> Option<&'a Value> {
        match *self {
            Match::Entry { key, .. } => Some(key),
            _ => None,
        }
    }

    /// The matched text fragment.
    pub fn as_text(&self) -> Option<&'a str> {
        match *self {
            Match::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// The collection, split by shape.
///
/// Only [`Value::Map`] is a mapping. JSON objects and other records land in
/// `Single` and are searched as one item, so the values of a nested object
/// are reached through a property path, never by iterating its fields.
#[derive(Debug, Clone, Copy)]
enum Collection<'a> {
    Sequence(&'a [Value]),
    Mapping(&'a [(Value, Value)]),
    Set(&'a [Value]),
    Text(&'a str),
    Single(&'a Value),
}

impl<'a> Collection<'a> {
    fn classify(source: &'a Value) -> Self {
        match source {
            Value::Array(items) => Collection::Sequence(items),
            Value::Map(entries) => Collection::Mapping(entries),
            Value::Set(items) => Collection::Set(items),
            Value::String(text) => Collection::Text(text),
            other => Collection::Single(other),
        }
    }

    /// Items a whole-collection contract applies to.
    fn elements(self) -> Box<dyn Iterator<Item = &'a Value> + 'a> {
        match self {
            Collection::Sequence(items) | Collection::Set(items) => Box::new(items.iter()),
            Collection::Mapping(entries) => Box::new(entries.iter().map(|(_, v)| v)),
            Collection::Text(_) => Box::new(std::iter::empty()),
            Collection::Single(item) => Box::new(std::iter::once(item)),
        }
    }
}

/// Per-search state shared by the shape handlers.
struct Scan {
    predicate: Predicate,
    path: Option<PropertyPath>,
}

impl Scan {
    fn candidate<'v>(&self, item: &'v Value) -> Option<&'v Value> {
        match &self.path {
            Some(path) => path.resolve(item),
            None => Some(item),
        }
    }

    /// Decides one item. `folded` is the aligned item from the normalized
    /// cache; it only stands in for the original when it resolves to text.
    fn accepts(&self, item: &Value, folded: Option<&Value>) -> bool {
        let original = self.candidate(item);
        let folded_text = folded
            .and_then(|f| self.candidate(f))
            .filter(|f| f.is_string());
        let candidate = match (original, folded_text) {
            (Some(_), Some(text)) => Some(text),
            (original, _) => original,
        };

        // Absent never matches
        let Some(candidate) = candidate else {
            return false;
        };

        self.predicate.test(candidate)
    }
}

/// Searches a borrowed collection.
///
/// # Example
///
/// ```
/// use quarry::{Options, QueryEngine, Value};
///
/// let fruit = Value::from(vec!["apple", "banana", "Apple", "orange"]);
/// let engine = QueryEngine::new(&fruit);
///
/// let hits = engine.search("Apple", None, &Options::default()).unwrap();
/// assert_eq!(hits.len(), 2);
///
/// let hits = engine.search("apple", None, &Options::new().case_sensitive(true)).unwrap();
/// assert_eq!(hits.len(), 1);
/// ```
///
/// The engine holds its normalized cache without synchronization; build one
/// engine per thread when searching from several threads.
#[derive(Debug)]
pub struct QueryEngine<'a> {
    source: &'a Value,
    shape: Shape,
    collection: Collection<'a>,
    text_only: bool,
    cache: NormalizedCache,
}

impl<'a> QueryEngine<'a> {
    /// Creates an engine over any collection.
    pub fn new(source: &'a Value) -> Self {
        QueryEngine {
            source,
            shape: Shape::of(source),
            collection: Collection::classify(source),
            text_only: false,
            cache: NormalizedCache::new(),
        }
    }

    /// Creates an engine over a collection declared to hold only text.
    ///
    /// Every element (sequence and set items, mapping values, or the single
    /// item) is checked now; the first non-text element fails with
    /// [`QuarryError::TypeMismatch`].
    pub fn text_only(source: &'a Value) -> Result<Self> {
        let mut engine = QueryEngine::new(source);
        if let Some(bad) = engine.collection.elements().find(|v| !v.is_string()) {
            return Err(QuarryError::TypeMismatch {
                mode: "text-only",
                expected: "text",
                actual: bad.type_name(),
            });
        }
        engine.text_only = true;
        Ok(engine)
    }

    /// The collection being searched.
    pub fn source(&self) -> &'a Value {
        self.source
    }

    /// Shape detected at construction.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Whether the collection was declared text-only.
    pub fn is_text_only(&self) -> bool {
        self.text_only
    }

    /// State of the normalized cache.
    pub fn cache_state(&self) -> CacheState {
        self.cache.state()
    }

    /// Drops the normalized cache. The next normalized search rebuilds it
    /// from the source.
    pub fn reset_normalization(&mut self) {
        self.cache.reset();
    }

    /// Runs a search.
    ///
    /// `path` addresses a field inside each item (dotted traversal needs
    /// `options.deep`). Results keep source order. The call either returns
    /// every match or fails without partial results.
    pub fn search(
        &self,
        query: impl Into<Value>,
        path: Option<&str>,
        options: &Options,
    ) -> Result<Vec<Match<'a>>> {
        let query = query.into();
        options.validate()?;
        log::debug!(
            "search shape={} mode={} path={:?} normalize={}",
            self.shape,
            options.mode,
            path,
            options.normalize
        );

        let policy = if options.case_sensitive {
            CasePolicy::Sensitive
        } else if options.normalize {
            CasePolicy::Prefolded
        } else {
            CasePolicy::Fold
        };
        let scan = Scan {
            predicate: Predicate::compile(options.mode, &query, policy)?,
            path: path.map(|p| PropertyPath::parse(p, options.deep)),
        };

        let hits = match self.collection {
            Collection::Sequence(items) => self.search_sequence(items, &scan, options),
            Collection::Mapping(entries) => self.search_mapping(entries, &scan, options),
            Collection::Set(_) => {
                return Err(QuarryError::UnsupportedShape {
                    shape: Shape::Set.as_str(),
                })
            }
            Collection::Text(text) => self.search_text(text, &scan, options),
            Collection::Single(item) => self.search_single(item, &scan, options),
        };

        log::debug!("search matched {} item(s)", hits.len());
        Ok(hits)
    }

    /// Number of matches for a search.
    pub fn count(
        &self,
        query: impl Into<Value>,
        path: Option<&str>,
        options: &Options,
    ) -> Result<usize> {
        self.search(query, path, options).map(|hits| hits.len())
    }

    /// Returns `true` if a search has at least one match.
    pub fn any(&self, query: impl Into<Value>, path: Option<&str>, options: &Options) -> Result<bool> {
        self.search(query, path, options)
            .map(|hits| !hits.is_empty())
    }

    /// First match of a search, in source order.
    pub fn first(
        &self,
        query: impl Into<Value>,
        path: Option<&str>,
        options: &Options,
    ) -> Result<Option<Match<'a>>> {
        self.search(query, path, options)
            .map(|hits| hits.into_iter().next())
    }

    fn folded(&self, options: &Options) -> Option<&Value> {
        options
            .normalize
            .then(|| self.cache.get_or_fold(self.source))
    }

    fn search_sequence(
        &self,
        items: &'a [Value],
        scan: &Scan,
        options: &Options,
    ) -> Vec<Match<'a>> {
        let folded = self.folded(options).and_then(Value::as_array);
        let mut hits = Vec::new();
        for (i, item) in items.iter().enumerate() {
            if scan.accepts(item, folded.and_then(|f| f.get(i))) {
                hits.push(Match::Item(item));
            }
        }
        hits
    }

    fn search_mapping(
        &self,
        entries: &'a [(Value, Value)],
        scan: &Scan,
        options: &Options,
    ) -> Vec<Match<'a>> {
        let folded = self.folded(options).and_then(Value::as_map);
        let mut hits = Vec::new();
        for (i, (key, value)) in entries.iter().enumerate() {
            let folded_value = folded.and_then(|f| f.get(i)).map(|(_, v)| v);
            if scan.accepts(value, folded_value) {
                hits.push(Match::Entry { key, value });
            }
        }
        hits
    }

    fn search_text(&self, text: &'a str, scan: &Scan, options: &Options) -> Vec<Match<'a>> {
        // A text collection is one item; a path cannot address into it
        if scan.path.is_some() {
            return Vec::new();
        }
        let found = match (&scan.predicate, self.folded(options)) {
            (Predicate::Exact { .. }, Some(folded)) => {
                if scan.predicate.test(folded) {
                    vec![text]
                } else {
                    Vec::new()
                }
            }
            (predicate, _) => predicate.locate(text),
        };
        found.into_iter().map(Match::Text).collect()
    }

    fn search_single(&self, item: &'a Value, scan: &Scan, options: &Options) -> Vec<Match<'a>> {
        if scan.accepts(item, self.folded(options)) {
            vec![Match::Item(item)]
        } else {
            Vec::new()
        }
    }
}
