//! Match strategies.
//!
//! A [`Predicate`] is the compiled form of a mode, a query and a case policy.
//! It is built once per search, before any item is looked at, so that query
//! errors surface up front and per-item work stays minimal.

use std::cmp::Ordering;

use regex::{Regex, RegexBuilder};

use crate::error::{QuarryError, Result};
use crate::options::Mode;
use crate::value::{fold_text, Number, Value};

/// How text operands are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CasePolicy {
    /// Literal comparison.
    Sensitive,
    /// Candidates are lower-cased at comparison time.
    Fold,
    /// Candidates were already lower-cased by the caller (normalized cache).
    Prefolded,
}

impl CasePolicy {
    /// Returns `true` unless comparisons are literal.
    pub fn is_insensitive(self) -> bool {
        !matches!(self, CasePolicy::Sensitive)
    }

    fn apply(self, text: &str) -> std::borrow::Cow<'_, str> {
        match self {
            CasePolicy::Fold => fold_text(text).into(),
            CasePolicy::Sensitive | CasePolicy::Prefolded => text.into(),
        }
    }
}

/// Compiled match predicate.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Structural equality; top-level text is compared per the case policy.
    Exact { query: Value, policy: CasePolicy },
    /// Text containment.
    Substring {
        needle: String,
        policy: CasePolicy,
        locator: Option<Regex>,
    },
    /// Regular expression search.
    Regex(Regex),
    /// Inclusive numeric interval. `None` when the query was not a valid
    /// `[low, high]` pair, which matches nothing.
    Range(Option<(Number, Number)>),
}

impl Predicate {
    /// Compiles a predicate.
    ///
    /// Fails with [`QuarryError::TypeMismatch`] when a text mode gets a
    /// non-text query and with [`QuarryError::InvalidPattern`] when a regex
    /// query does not compile.
    pub fn compile(mode: Mode, query: &Value, policy: CasePolicy) -> Result<Self> {
        match mode {
            Mode::Exact => {
                let query = match query {
                    Value::String(s) if policy.is_insensitive() => Value::String(fold_text(s)),
                    other => other.clone(),
                };
                Ok(Predicate::Exact { query, policy })
            }
            Mode::Substring => {
                let needle = text_query(mode, query)?;
                let locator = if policy.is_insensitive() {
                    Some(
                        RegexBuilder::new(&regex::escape(needle))
                            .case_insensitive(true)
                            .build()?,
                    )
                } else {
                    None
                };
                let needle = if policy.is_insensitive() {
                    fold_text(needle)
                } else {
                    needle.to_string()
                };
                Ok(Predicate::Substring {
                    needle,
                    policy,
                    locator,
                })
            }
            Mode::Regex => {
                let pattern = text_query(mode, query)?;
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(policy.is_insensitive())
                    .build()?;
                Ok(Predicate::Regex(regex))
            }
            Mode::Range => Ok(Predicate::Range(range_bounds(query))),
        }
    }

    /// The mode this predicate was compiled from.
    pub fn mode(&self) -> Mode {
        match self {
            Predicate::Exact { .. } => Mode::Exact,
            Predicate::Substring { .. } => Mode::Substring,
            Predicate::Regex(_) => Mode::Regex,
            Predicate::Range(_) => Mode::Range,
        }
    }

    /// Tests a candidate value.
    pub fn test(&self, candidate: &Value) -> bool {
        match (self, candidate) {
            (Predicate::Exact { query, policy }, Value::String(s)) => match query {
                Value::String(q) => policy.apply(s) == q.as_str(),
                _ => false,
            },
            (Predicate::Exact { query, .. }, other) => other == query,

            (Predicate::Substring { needle, policy, .. }, Value::String(s)) => {
                policy.apply(s).contains(needle.as_str())
            }
            (Predicate::Regex(regex), Value::String(s)) => regex.is_match(s),

            (Predicate::Range(Some((low, high))), Value::Number(n)) => {
                at_most(*low, *n) && at_most(*n, *high)
            }

            // Non-text candidate for a text mode, or a malformed range
            _ => false,
        }
    }

    /// Finds the parts of `text` that satisfy this predicate.
    ///
    /// Exact yields the whole text, substring the first occurrence, regex
    /// every non-overlapping match. Range never matches text.
    pub fn locate<'t>(&self, text: &'t str) -> Vec<&'t str> {
        match self {
            Predicate::Exact { .. } => {
                if self.test(&Value::String(text.to_string())) {
                    vec![text]
                } else {
                    Vec::new()
                }
            }
            Predicate::Substring {
                needle, locator, ..
            } => {
                let found = match locator {
                    Some(regex) => regex.find(text).map(|m| m.as_str()),
                    None => text.find(needle.as_str()).map(|at| &text[at..at + needle.len()]),
                };
                found.into_iter().collect()
            }
            Predicate::Regex(regex) => regex.find_iter(text).map(|m| m.as_str()).collect(),
            Predicate::Range(_) => Vec::new(),
        }
    }
}

fn text_query(mode: Mode, query: &Value) -> Result<&str> {
    query.as_str().ok_or(QuarryError::TypeMismatch {
        mode: mode.as_str(),
        expected: "text",
        actual: query.type_name(),
    })
}

fn range_bounds(query: &Value) -> Option<(Number, Number)> {
    match query.as_array()? {
        [low, high] => Some((low.as_number()?, high.as_number()?)),
        _ => None,
    }
}

fn at_most(a: Number, b: Number) -> bool {
    matches!(a.compare(b), Some(Ordering::Less | Ordering::Equal))
}

/// Tests a single candidate against a query.
///
/// ```
/// use quarry::{matches, Mode, Value};
///
/// assert!(matches(Mode::Exact, &"Apple".into(), &"apple".into(), false).unwrap());
/// assert!(!matches(Mode::Exact, &"Apple".into(), &"apple".into(), true).unwrap());
/// assert!(matches(Mode::Range, &15.into(), &(10, 20).into(), false).unwrap());
/// ```
pub fn matches(mode: Mode, candidate: &Value, query: &Value, case_sensitive: bool) -> Result<bool> {
    let policy = if case_sensitive {
        CasePolicy::Sensitive
    } else {
        CasePolicy::Fold
    };
    Ok(Predicate::compile(mode, query, policy)?.test(candidate))
}
