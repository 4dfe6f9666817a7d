//! Placeholder overlay: reuse of compatible containers, progressive
//! overwriting, and trimming at container close.

mod common;

use common::from_json;
use jsonloom::{IncompleteStrings, Parser, ParserOptions, Value};
use serde_json::json;

fn with_placeholder(placeholder: serde_json::Value) -> Parser {
    let mut parser = Parser::new(ParserOptions::default());
    parser.set_placeholder(from_json(&placeholder)).unwrap();
    parser
}

#[test]
fn placeholder_is_visible_before_any_input() {
    let parser = with_placeholder(json!({"name": null, "tags": []}));
    assert_eq!(parser.value(), &from_json(&json!({"name": null, "tags": []})));
}

#[test]
fn visited_keys_overwrite_and_unvisited_keys_trim_at_close() {
    let mut parser = with_placeholder(json!([{"a": null, "b": null, "c": null}]));
    parser.push(r#"[{"a":1,"b":2}]"#).unwrap();
    parser.close().unwrap();
    assert_eq!(parser.value(), &from_json(&json!([{"a": 1.0, "b": 2.0}])));
}

#[test]
fn unvisited_keys_stay_visible_until_their_container_closes() {
    let mut parser = with_placeholder(json!({"a": null, "b": null}));
    parser.push(r#"{"a":1"#).unwrap();
    assert_eq!(parser.value(), &from_json(&json!({"a": 1.0, "b": null})));
}

#[test]
fn trimming_applies_only_to_containers_whose_close_was_seen() {
    let mut parser = with_placeholder(json!({
        "a": {"x": null, "y": null},
        "b": null
    }));
    parser.push(r#"{"a":{"x":1}"#).unwrap();
    // The inner object closed: "y" is gone. The outer one did not: "b"
    // remains.
    assert_eq!(
        parser.value(),
        &from_json(&json!({"a": {"x": 1.0}, "b": null}))
    );
}

#[test]
fn array_placeholder_overwrites_by_index_and_truncates() {
    let mut parser = with_placeholder(json!(["one", "two", "three"]));
    parser.push("[true").unwrap();
    assert_eq!(
        parser.value(),
        &from_json(&json!([true, "two", "three"]))
    );
    parser.push("]").unwrap();
    parser.close().unwrap();
    assert_eq!(parser.value(), &from_json(&json!([true])));
}

#[test]
fn input_keys_missing_from_the_placeholder_are_inserted() {
    let mut parser = with_placeholder(json!({"a": null}));
    parser.push(r#"{"a":1,"b":2}"#).unwrap();
    parser.close().unwrap();
    assert_eq!(parser.value(), &from_json(&json!({"a": 1.0, "b": 2.0})));
}

#[test]
fn incompatible_placeholder_containers_are_replaced() {
    // Array where an object arrives, scalar where an array arrives.
    let mut parser = with_placeholder(json!({"a": [1, 2], "b": 7}));
    parser.push(r#"{"a":{"k":0},"b":[]}"#).unwrap();
    parser.close().unwrap();
    assert_eq!(parser.value(), &from_json(&json!({"a": {"k": 0.0}, "b": []})));
}

#[test]
fn scalar_placeholders_are_simply_overwritten() {
    let mut parser = with_placeholder(json!(42));
    parser.push(r#"{"a":1}"#).unwrap();
    parser.close().unwrap();
    assert_eq!(parser.value(), &from_json(&json!({"a": 1.0})));
}

#[test]
fn empty_object_input_trims_every_placeholder_key() {
    let mut parser = with_placeholder(json!({"a": null, "b": null}));
    parser.push("{}").unwrap();
    parser.close().unwrap();
    assert_eq!(parser.value(), &from_json(&json!({})));
}

#[test]
fn nested_placeholders_under_unvisited_branches_survive() {
    let mut parser = with_placeholder(json!({
        "header": {"title": "…"},
        "items": [{"id": null}]
    }));
    parser.push(r#"{"header":{"title":"hi"}"#).unwrap();
    assert_eq!(
        parser.value(),
        &from_json(&json!({"header": {"title": "hi"}, "items": [{"id": null}]}))
    );
}

#[test]
fn placeholder_combines_with_incomplete_strings() {
    let mut parser = Parser::new(ParserOptions {
        incomplete_strings: IncompleteStrings::WithSuffix("…".into()),
        ..Default::default()
    });
    parser
        .set_placeholder(from_json(&json!({"msg": "loading"})))
        .unwrap();
    parser.push(r#"{"msg": "Hel"#).unwrap();
    assert_eq!(parser.value(), &from_json(&json!({"msg": "Hel…"})));
    parser.push(r#"lo"}"#).unwrap();
    parser.close().unwrap();
    assert_eq!(parser.value(), &from_json(&json!({"msg": "Hello"})));
}

#[test]
fn duplicate_keys_without_placeholder_do_not_merge() {
    // Container reuse is a placeholder behavior; without one, a duplicate
    // key's object replaces the earlier value wholesale.
    let mut parser = Parser::new(ParserOptions::default());
    parser.push(r#"{"a":{"x":1},"a":{}}"#).unwrap();
    parser.close().unwrap();
    assert_eq!(parser.value(), &from_json(&json!({"a": {}})));
}

#[test]
fn reset_discards_the_placeholder() {
    let mut parser = with_placeholder(json!(["skeleton"]));
    parser.reset();
    assert_eq!(parser.value(), &Value::Null);
    parser.push("[null]").unwrap();
    parser.close().unwrap();
    assert_eq!(parser.value(), &from_json(&json!([null])));
}
