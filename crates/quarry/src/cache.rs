//! Case-folded copy of a collection, used by normalized searches.
//!
//! The cache never replaces the source. It is built from the source on first
//! use and can be dropped at any time; the next normalized search rebuilds it.

use once_cell::unsync::OnceCell;

use crate::value::Value;

/// State of a [`NormalizedCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheState {
    /// Nothing computed yet, or reset since.
    Clear,
    /// A folded copy is available.
    Populated,
}

/// Lazily computed case-folded copy of a collection.
///
/// The copy has the same structure as the source, so the item at a given
/// position or key in the copy corresponds to the same item in the source.
#[derive(Debug, Default)]
pub struct NormalizedCache {
    folded: OnceCell<Value>,
}

impl NormalizedCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        NormalizedCache::default()
    }

    /// Returns the folded copy of `source`, computing it on first call.
    ///
    /// Callers must always pass the same source; the engine guarantees this
    /// by owning both.
    pub fn get_or_fold(&self, source: &Value) -> &Value {
        self.folded.get_or_init(|| {
            log::trace!("populating normalized cache ({})", source.type_name());
            source.fold_case()
        })
    }

    /// Drops the folded copy.
    pub fn reset(&mut self) {
        if self.folded.take().is_some() {
            log::trace!("normalized cache reset");
        }
    }

    /// Current state.
    pub fn state(&self) -> CacheState {
        match self.folded.get() {
            Some(_) => CacheState::Populated,
            None => CacheState::Clear,
        }
    }
}
