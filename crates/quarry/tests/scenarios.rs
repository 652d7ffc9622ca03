//! End-to-end search scenarios and the error taxonomy.

use quarry::{CacheState, Match, Mode, Options, QuarryError, QueryEngine, Shape, Value};
use serde_json::json;

fn values<'a>(hits: &[Match<'a>]) -> Vec<&'a Value> {
    hits.iter().filter_map(Match::value).collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn exact_case_sensitive_sequence() {
    let fruit = Value::from(json!(["apple", "banana", "Apple", "orange"]));
    let engine = QueryEngine::new(&fruit);

    let hits = engine
        .search("apple", None, &Options::new().case_sensitive(true))
        .unwrap();
    assert_eq!(values(&hits), vec![&Value::from("apple")]);
}

#[test]
fn exact_default_options_fold_case() {
    let fruit = Value::from(json!(["apple", "banana", "Apple", "orange"]));
    let engine = QueryEngine::new(&fruit);

    let hits = engine.search("Apple", None, &Options::default()).unwrap();
    assert_eq!(values(&hits), vec![&Value::from("apple"), &Value::from("Apple")]);
}

#[test]
fn property_match_on_records() {
    let people = Value::from(json!([
        {"name": "John", "age": 20},
        {"name": "Jane", "age": 30},
    ]));
    let engine = QueryEngine::new(&people);

    let hits = engine
        .search("John", Some("name"), &Options::new().case_sensitive(true))
        .unwrap();
    assert_eq!(values(&hits), vec![&Value::from(json!({"name": "John", "age": 20}))]);
}

#[test]
fn substring_in_text() {
    let text = Value::from("Hi, how are you?");
    let engine = QueryEngine::new(&text);

    let hits = engine
        .search("Hi", None, &Options::new().mode(Mode::Substring))
        .unwrap();
    assert_eq!(hits, vec![Match::Text("Hi")]);
}

#[test]
fn numeric_range() {
    let numbers = Value::from(json!([5, 12, 20, 31]));
    let engine = QueryEngine::new(&numbers);

    let hits = engine
        .search(json!([10, 20]), None, &Options::new().mode(Mode::Range))
        .unwrap();
    assert_eq!(values(&hits), vec![&Value::from(12), &Value::from(20)]);
}

#[test]
fn deep_path_is_opt_in() {
    let users = Value::from(json!([{"user": {"profile": {"name": "John"}}}]));
    let engine = QueryEngine::new(&users);

    let deep = engine
        .search("John", Some("user.profile.name"), &Options::new().deep(true))
        .unwrap();
    assert_eq!(values(&deep), vec![&users.as_array().unwrap()[0]]);

    let shallow = engine
        .search("John", Some("user.profile.name"), &Options::new().deep(false))
        .unwrap();
    assert!(shallow.is_empty());
}

#[test]
fn literal_dotted_key_without_deep() {
    let rows = Value::from(json!([{"user.name": "John"}, {"user": {"name": "John"}}]));
    let engine = QueryEngine::new(&rows);

    let shallow = engine.search("john", Some("user.name"), &Options::default()).unwrap();
    assert_eq!(values(&shallow), vec![&rows.as_array().unwrap()[0]]);

    let deep = engine
        .search("john", Some("user.name"), &Options::new().deep(true))
        .unwrap();
    assert_eq!(values(&deep), vec![&rows.as_array().unwrap()[1]]);
}

#[test]
fn mapping_entries_keep_insertion_order() {
    let scores = Value::Map(vec![
        (Value::from("zed"), Value::from(json!({"score": 90}))),
        (Value::from("amy"), Value::from(json!({"score": 40}))),
        (Value::from("bob"), Value::from(json!({"score": 75}))),
    ]);
    let engine = QueryEngine::new(&scores);
    assert_eq!(engine.shape(), Shape::Mapping);

    let hits = engine
        .search((50, 100), Some("score"), &Options::new().mode(Mode::Range))
        .unwrap();
    let keys: Vec<_> = hits.iter().filter_map(Match::key).collect();
    assert_eq!(keys, vec![&Value::from("zed"), &Value::from("bob")]);
}

#[test]
fn regex_over_text_returns_every_match() {
    let text = Value::from("cat, Cat, CAT and dog");
    let engine = QueryEngine::new(&text);

    let all = engine
        .search("cat", None, &Options::new().mode(Mode::Regex))
        .unwrap();
    assert_eq!(all, vec![Match::Text("cat"), Match::Text("Cat"), Match::Text("CAT")]);

    let literal = engine
        .search("cat", None, &Options::new().mode(Mode::Regex).case_sensitive(true))
        .unwrap();
    assert_eq!(literal, vec![Match::Text("cat")]);
}

#[test]
fn regex_filters_sequences() {
    let files = Value::from(json!(["main.rs", "lib.RS", "notes.md"]));
    let engine = QueryEngine::new(&files);

    let hits = engine
        .search(r"\.rs$", None, &Options::new().mode(Mode::Regex))
        .unwrap();
    assert_eq!(hits.len(), 2);
}

#[test]
fn options_from_configuration_document() {
    let fruit = Value::from(json!(["apple", "banana", "Apple"]));
    let engine = QueryEngine::new(&fruit);
    let opts = Options::from_json(&json!({"mode": "substring", "caseSensitive": true})).unwrap();

    let hits = engine.search("pp", None, &opts).unwrap();
    assert_eq!(values(&hits), vec![&Value::from("apple"), &Value::from("Apple")]);
}

#[test]
fn normalized_cache_lifecycle() {
    let fruit = Value::from(json!(["Apple", "APPLE", "pear"]));
    let mut engine = QueryEngine::new(&fruit);

    let hits = engine
        .search("apple", None, &Options::new().normalize(true))
        .unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(engine.cache_state(), CacheState::Populated);

    engine.reset_normalization();
    assert_eq!(engine.cache_state(), CacheState::Clear);

    // Rebuilt from the untouched source
    let again = engine
        .search("apple", None, &Options::new().normalize(true))
        .unwrap();
    assert_eq!(again.len(), 2);
    assert_eq!(fruit, Value::from(json!(["Apple", "APPLE", "pear"])));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn unsupported_mode_from_text() {
    let err = "fuzzy".parse::<Mode>().unwrap_err();
    assert!(matches!(err, QuarryError::UnsupportedMode(ref m) if m == "fuzzy"));
    assert_eq!(err.to_string(), "unsupported match mode: 'fuzzy'");
}

#[test]
fn conflicting_options() {
    let fruit = Value::from(json!(["apple"]));
    let engine = QueryEngine::new(&fruit);
    let err = engine
        .search("apple", None, &Options::new().case_sensitive(true).normalize(true))
        .unwrap_err();
    assert!(matches!(err, QuarryError::ConflictingOptions));
    assert_eq!(engine.cache_state(), CacheState::Clear);
}

#[test]
fn type_mismatch_for_non_text_query() {
    let fruit = Value::from(json!(["apple"]));
    let engine = QueryEngine::new(&fruit);
    let err = engine
        .search(42, None, &Options::new().mode(Mode::Substring))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "type mismatch in substring mode: expected text, got number"
    );
}

#[test]
fn type_mismatch_for_text_only_collection() {
    let mixed = Value::from(json!(["apple", true]));
    let err = QueryEngine::text_only(&mixed).unwrap_err();
    assert!(matches!(
        err,
        QuarryError::TypeMismatch { expected: "text", actual: "bool", .. }
    ));
}

#[test]
fn invalid_pattern() {
    let text = Value::from("anything");
    let engine = QueryEngine::new(&text);
    let err = engine
        .search("a(b", None, &Options::new().mode(Mode::Regex))
        .unwrap_err();
    assert!(matches!(err, QuarryError::InvalidPattern(_)));
}

#[test]
fn unsupported_set_shape() {
    let tags = Value::Set(vec![Value::from("a"), Value::from("b")]);
    let engine = QueryEngine::new(&tags);
    let err = engine.search("a", None, &Options::default()).unwrap_err();
    assert_eq!(err.to_string(), "unsupported collection shape: set");
}
