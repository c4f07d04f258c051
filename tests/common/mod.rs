// Shared fixtures for viewmap integration tests
#![allow(dead_code)]

use std::path::PathBuf;
use viewmap::{Object, ResolvedNode, ResolverConfig, Value};

/// Parses JSON keeping object key order.
pub fn json(input: &str) -> Value {
    Value::from_json_str(input).expect("fixture JSON must parse")
}

pub fn resolve_json(input: &str) -> ResolvedNode {
    viewmap::resolve(&json(input), &ResolverConfig::default())
}

/// `{"name": "loop", "self": <itself>}`
pub fn self_referential() -> Value {
    let object = Object::new();
    object.insert("name", Value::from("loop"));
    object.insert("self", Value::Object(object.clone()));
    Value::Object(object)
}

/// `{"level": {"level": ... {"leaf": 1}}}` with `levels` wrapping objects.
pub fn nested(levels: usize) -> Value {
    (0..levels).fold(json(r#"{"leaf": 1}"#), |inner, _| {
        Value::Object(Object::from_entries([("level", inner)]))
    })
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

/// Paths of every node in pre-order, as `$.a[0]` strings.
pub fn paths(node: &ResolvedNode) -> Vec<String> {
    node.walk().map(|n| n.path_string()).collect()
}
