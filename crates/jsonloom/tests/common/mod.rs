#![allow(dead_code)]

use jsonloom::{chunks_of, Map, Parser, ParserError, ParserOptions, SyntaxError, Value};

/// Parses a complete document in one push.
pub fn parse_document(text: &str) -> Value {
    let mut parser = Parser::new(ParserOptions::default());
    parser.push(text).expect("push failed");
    parser.close().expect("close failed");
    parser.value().clone()
}

/// Parses a complete document fed in chunks of at most `size` bytes.
pub fn parse_chunked(text: &str, size: usize, options: ParserOptions) -> Value {
    let mut parser = Parser::new(options);
    for chunk in chunks_of(text, size) {
        parser.push(chunk).expect("push failed");
    }
    parser.close().expect("close failed");
    parser.value().clone()
}

/// Parses a document expected to be malformed, returning the syntax error.
pub fn parse_error(text: &str) -> SyntaxError {
    let mut parser = Parser::new(ParserOptions::default());
    let result = parser.push(text).and_then(|()| parser.close());
    match result {
        Err(ParserError::Syntax(err)) => err,
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

/// Converts a `serde_json` fixture into the crate's value type, preserving
/// key order.
pub fn from_json(v: &serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(*b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().expect("finite number")),
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => Value::Array(items.iter().map(from_json).collect()),
        serde_json::Value::Object(map) => {
            let mut out = Map::default();
            for (k, val) in map {
                out.insert(k.clone(), from_json(val));
            }
            Value::Object(out)
        }
    }
}
