//! In-memory JSON-like values.
//!
//! Containers (`Array`, `Object`) are shared handles, so a host can build
//! aliased and self-referential graphs such as `a.self = a`. The identity of
//! a container is exposed as a [`NodeId`]; cycle detection keys on it rather
//! than on structural equality.
//!
//! Handles are strong `Arc` references. A cyclic graph keeps itself alive:
//! after `a.self = a` the object is never freed, even once every outside
//! handle is dropped. Hosts that build cycles must break them, for example
//! with `a.remove("self")` or by replacing the entry, before letting go.
//!
//! Objects keep insertion order. Keys are unique: inserting an existing key
//! replaces the value in place without moving it.

mod serde_impl;

use parking_lot::RwLock;
use serde_json::Number;
use std::fmt;
use std::sync::Arc;

/// Explicit view-kind discriminator.
pub const TYPE_KEY: &str = "_type";
/// Arrangement override (`list`, `grid`, ...).
pub const LAYOUT_KEY: &str = "_layout";
/// Column count override.
pub const COLUMNS_KEY: &str = "_columns";
/// Column span of a child inside its parent arrangement.
pub const SPAN_KEY: &str = "_span";

/// Keys stripped before structural inspection.
pub const RESERVED_KEYS: [&str; 4] = [TYPE_KEY, LAYOUT_KEY, COLUMNS_KEY, SPAN_KEY];

/// Placeholder emitted when serializing a container that is its own ancestor.
pub const CIRCULAR_PLACEHOLDER: &str = "[Circular]";

pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Opaque identity token of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A JSON-compatible node.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Array),
    Object(Object),
}

/// Shared, ordered sequence of values.
#[derive(Clone, Default)]
pub struct Array {
    inner: Arc<RwLock<Vec<Value>>>,
}

/// Shared, insertion-ordered mapping from string keys to values.
#[derive(Clone, Default)]
pub struct Object {
    inner: Arc<RwLock<Vec<(String, Value)>>>,
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(items: Vec<Value>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(items)),
        }
    }

    pub fn id(&self) -> NodeId {
        NodeId(Arc::as_ptr(&self.inner) as usize)
    }

    pub fn ptr_eq(&self, other: &Array) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn len(&self) -> usize {
        self.inner.read_recursive().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.inner.read_recursive().get(index).cloned()
    }

    /// Appends `value`. Pushing an ancestor of this array creates a
    /// reference cycle that is leaked unless the element is later removed.
    pub fn push(&self, value: Value) {
        self.inner.write().push(value);
    }

    /// Removes and returns the last element.
    pub fn pop(&self) -> Option<Value> {
        self.inner.write().pop()
    }

    /// Snapshot of the elements. Cheap: nested containers are handles.
    pub fn to_vec(&self) -> Vec<Value> {
        self.inner.read_recursive().clone()
    }

    /// Runs `f` against the elements without cloning them.
    pub fn with_items<R>(&self, f: impl FnOnce(&[Value]) -> R) -> R {
        f(&self.inner.read_recursive())
    }
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let object = Self::new();
        for (key, value) in entries {
            object.insert(key, value);
        }
        object
    }

    pub fn id(&self) -> NodeId {
        NodeId(Arc::as_ptr(&self.inner) as usize)
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn len(&self) -> usize {
        self.inner.read_recursive().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner
            .read_recursive()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.read_recursive().iter().any(|(k, _)| k == key)
    }

    /// Inserts or replaces `key`, returning the previous value. Inserting an
    /// ancestor of this object creates a reference cycle that is leaked
    /// until the entry is replaced or removed.
    pub fn insert(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        let mut entries = self.inner.write();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                entries.push((key, value));
                None
            }
        }
    }

    /// Removes `key`, returning its value. Later entries keep their order.
    pub fn remove(&self, key: &str) -> Option<Value> {
        let mut entries = self.inner.write();
        let index = entries.iter().position(|(k, _)| k == key)?;
        Some(entries.remove(index).1)
    }

    pub fn keys(&self) -> Vec<String> {
        self.inner
            .read_recursive()
            .iter()
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Snapshot of the entries in insertion order.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.inner.read_recursive().clone()
    }

    /// Entries with the reserved `_type`/`_layout`/`_columns`/`_span` keys removed.
    pub fn without_reserved(&self) -> Vec<(String, Value)> {
        self.inner
            .read_recursive()
            .iter()
            .filter(|(k, _)| !is_reserved_key(k))
            .cloned()
            .collect()
    }

    pub fn with_entries<R>(&self, f: impl FnOnce(&[(String, Value)]) -> R) -> R {
        f(&self.inner.read_recursive())
    }

    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|v| v.as_str().map(str::to_owned))
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.as_f64())
    }

    /// Non-negative integer field, accepting integral floats such as `3.0`.
    pub fn get_usize(&self, key: &str) -> Option<usize> {
        let value = self.get(key)?;
        match value {
            Value::Number(n) => n.as_u64().map(|n| n as usize).or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as usize)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl Value {
    pub fn from_json_str(input: &str) -> crate::errors::Result<Value> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Strings and numbers both render as text.
    pub fn is_string_like(&self) -> bool {
        matches!(self, Value::String(_) | Value::Number(_))
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn container_id(&self) -> Option<NodeId> {
        match self {
            Value::Array(array) => Some(array.id()),
            Value::Object(object) => Some(object.id()),
            _ => None,
        }
    }

    /// Looks up `key` when this is an object.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.as_object().and_then(|object| object.get(key))
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.as_object()
            .is_some_and(|object| object.contains_key(key))
    }

    /// JavaScript-style truthiness, used by the presentation heuristics.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// Text rendering of a primitive. Containers have none.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Null => Some("null".to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        let mut comparing = Vec::new();
        values_equal(self, other, &mut comparing)
    }
}

/// Structural equality. A pair of containers already being compared further up
/// the chain is assumed equal, which keeps cyclic graphs finite.
fn values_equal(left: &Value, right: &Value, comparing: &mut Vec<(NodeId, NodeId)>) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            if a.ptr_eq(b) {
                return true;
            }
            let pair = (a.id(), b.id());
            if comparing.contains(&pair) {
                return true;
            }
            let (xs, ys) = (a.to_vec(), b.to_vec());
            if xs.len() != ys.len() {
                return false;
            }
            comparing.push(pair);
            let equal = xs
                .iter()
                .zip(ys.iter())
                .all(|(x, y)| values_equal(x, y, comparing));
            comparing.pop();
            equal
        }
        (Value::Object(a), Value::Object(b)) => {
            if a.ptr_eq(b) {
                return true;
            }
            let pair = (a.id(), b.id());
            if comparing.contains(&pair) {
                return true;
            }
            let (xs, ys) = (a.entries(), b.entries());
            if xs.len() != ys.len() {
                return false;
            }
            comparing.push(pair);
            let equal = xs
                .iter()
                .zip(ys.iter())
                .all(|((kx, x), (ky, y))| kx == ky && values_equal(x, y, comparing));
            comparing.pop();
            equal
        }
        _ => false,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Value::Array(self.clone()), f)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Value::Object(self.clone()), f)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Number(value.into())
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Number((value as u64).into())
    }
}

impl From<f64> for Value {
    /// Non-finite floats have no JSON representation and become `Null`.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Array::from_vec(items))
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Value::Array(array)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

/// Object key order follows `serde_json::Map`, which is sorted unless the
/// `preserve_order` feature is on. Use [`Value::from_json_str`] to keep
/// document order.
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(Array::from_vec(items.into_iter().map(Value::from).collect()))
            }
            serde_json::Value::Object(map) => Value::Object(Object::from_entries(
                map.into_iter().map(|(k, v)| (k, Value::from(v))),
            )),
        }
    }
}
