//! Search options and match modes.
//!
//! [`Options`] is the explicit configuration record for a search. It can be
//! built fluently or read from a camelCase JSON document:
//!
//! ```
//! use quarry::{Mode, Options};
//!
//! let built = Options::new().mode(Mode::Regex).case_sensitive(true);
//! let read = Options::from_json_str(r#"{"mode": "regex", "caseSensitive": true}"#).unwrap();
//! assert_eq!(built, read);
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{QuarryError, Result};

/// Match strategy selected for a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Structural equality, case-folded for text unless case sensitive.
    #[default]
    Exact,
    /// Text containment.
    Substring,
    /// Regular expression match.
    Regex,
    /// Inclusive numeric range `[low, high]`.
    Range,
}

impl Mode {
    /// All modes, in declaration order.
    pub const ALL: [Mode; 4] = [Mode::Exact, Mode::Substring, Mode::Regex, Mode::Range];

    /// Returns `true` if this mode only applies to text operands.
    pub fn requires_text(self) -> bool {
        matches!(self, Mode::Substring | Mode::Regex)
    }

    /// Returns the display name of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Exact => "exact",
            Mode::Substring => "substring",
            Mode::Regex => "regex",
            Mode::Range => "range",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mode {
    type Err = QuarryError;

    fn from_str(s: &str) -> Result<Self> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| QuarryError::UnsupportedMode(s.to_string()))
    }
}

/// Options controlling a single search.
///
/// Defaults: `exact` mode, case-insensitive, no normalization, no deep
/// path traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Match strategy.
    pub mode: Mode,
    /// Compare text literally instead of case-folded.
    pub case_sensitive: bool,
    /// Case-fold the collection once into the engine cache before matching.
    pub normalize: bool,
    /// Split property paths on `.` and walk nested values.
    pub deep: bool,
}

impl Options {
    /// Creates options with all defaults.
    pub fn new() -> Self {
        Options::default()
    }

    /// Sets the match mode.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets literal (case-sensitive) text comparison.
    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    /// Enables eager case normalization through the engine cache.
    pub fn normalize(mut self, yes: bool) -> Self {
        self.normalize = yes;
        self
    }

    /// Enables dotted path traversal.
    pub fn deep(mut self, yes: bool) -> Self {
        self.deep = yes;
        self
    }

    /// Checks option combinations.
    pub fn validate(&self) -> Result<()> {
        if self.case_sensitive && self.normalize {
            return Err(QuarryError::ConflictingOptions);
        }
        Ok(())
    }

    /// Returns `true` when text comparisons should be case-folded.
    pub fn folds_case(&self) -> bool {
        !self.case_sensitive
    }

    /// Reads options from a JSON document. Missing fields take defaults.
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        let raw = RawOptions::deserialize(json)
            .map_err(|e| QuarryError::InvalidOptions(e.to_string()))?;
        raw.into_options()
    }

    /// Parses options from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: RawOptions =
            serde_json::from_str(text).map_err(|e| QuarryError::InvalidOptions(e.to_string()))?;
        raw.into_options()
    }
}

impl<'de> Deserialize<'de> for Options {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        RawOptions::deserialize(deserializer)?
            .into_options()
            .map_err(serde::de::Error::custom)
    }
}

/// Wire form of [`Options`], with the mode still as free text.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
struct RawOptions {
    mode: Option<String>,
    case_sensitive: bool,
    normalize: bool,
    deep: bool,
}

impl RawOptions {
    fn into_options(self) -> Result<Options> {
        let mode = match self.mode {
            Some(name) => name.parse()?,
            None => Mode::default(),
        };
        Ok(Options {
            mode,
            case_sensitive: self.case_sensitive,
            normalize: self.normalize,
            deep: self.deep,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let opts = Options::default();
        assert_eq!(opts.mode, Mode::Exact);
        assert!(!opts.case_sensitive);
        assert!(!opts.normalize);
        assert!(!opts.deep);
        assert!(opts.folds_case());
    }

    #[test]
    fn mode_parsing() {
        assert_eq!("exact".parse::<Mode>().unwrap(), Mode::Exact);
        assert_eq!("Substring".parse::<Mode>().unwrap(), Mode::Substring);
        assert_eq!(" regex ".parse::<Mode>().unwrap(), Mode::Regex);
        assert_eq!("RANGE".parse::<Mode>().unwrap(), Mode::Range);
        assert!(matches!(
            "fuzzy".parse::<Mode>(),
            Err(QuarryError::UnsupportedMode(name)) if name == "fuzzy"
        ));
    }

    #[test]
    fn mode_display_round_trips() {
        for mode in Mode::ALL {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn text_modes() {
        assert!(Mode::Substring.requires_text());
        assert!(Mode::Regex.requires_text());
        assert!(!Mode::Exact.requires_text());
        assert!(!Mode::Range.requires_text());
    }

    #[test]
    fn conflicting_flags_fail_validation() {
        let opts = Options::new().case_sensitive(true).normalize(true);
        assert!(matches!(opts.validate(), Err(QuarryError::ConflictingOptions)));
        assert!(Options::new().normalize(true).validate().is_ok());
        assert!(Options::new().case_sensitive(true).validate().is_ok());
    }

    #[test]
    fn reads_camel_case_json() {
        let opts = Options::from_json(&json!({"mode": "range", "deep": true})).unwrap();
        assert_eq!(opts, Options::new().mode(Mode::Range).deep(true));

        let opts = Options::from_json(&json!({})).unwrap();
        assert_eq!(opts, Options::default());
    }

    #[test]
    fn unknown_mode_in_json() {
        let err = Options::from_json(&json!({"mode": "fuzzy"})).unwrap_err();
        assert!(matches!(err, QuarryError::UnsupportedMode(_)));
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(
            Options::from_json(&json!({"caseSensitive": "yes"})),
            Err(QuarryError::InvalidOptions(_))
        ));
        assert!(matches!(
            Options::from_json(&json!({"colour": "red"})),
            Err(QuarryError::InvalidOptions(_))
        ));
        assert!(matches!(
            Options::from_json_str("{not json"),
            Err(QuarryError::InvalidOptions(_))
        ));
    }

    #[test]
    fn serde_round_trip_through_serialize() {
        let opts = Options::new().mode(Mode::Substring).normalize(true);
        let text = serde_json::to_string(&opts).unwrap();
        assert_eq!(
            text,
            r#"{"mode":"substring","caseSensitive":false,"normalize":true,"deep":false}"#
        );
        let back: Options = serde_json::from_str(&text).unwrap();
        assert_eq!(back, opts);
    }
}
