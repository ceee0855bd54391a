use crate::path;
use crate::types::{Object, Value};
use std::sync::Arc;

/// The read-only data an expression is evaluated against.
///
/// Holds a root value (normally an object) with record data, store values and
/// helper functions. Evaluation never mutates it.
///
/// ```
/// use schema_expr::{Scope, Value};
/// use serde_json::json;
///
/// let scope = Scope::from_json(json!({"user": {"name": "Ada"}}))
///     .with_function("upper", |args| {
///         Value::from(args.first().map(|v| v.to_string().to_uppercase()).unwrap_or_default())
///     });
/// assert_eq!(scope.get("user.name"), Value::from("Ada"));
/// assert!(matches!(scope.get("upper"), Value::Function(_)));
/// ```
#[derive(Debug, Clone)]
pub struct Scope {
    root: Value,
}

impl Default for Scope {
    fn default() -> Self {
        Scope::new(Value::object(Object::new()))
    }
}

impl Scope {
    pub fn new(root: Value) -> Self {
        Scope { root }
    }

    pub fn from_json(root: serde_json::Value) -> Self {
        Scope::new(Value::from(root))
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Resolves a dotted / bracket path. Missing paths are `undefined`.
    pub fn get(&self, path: &str) -> Value {
        path::get_path(&self.root, path)
    }

    /// Sets a top-level key. A non-object root is replaced by an empty object
    /// first.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        if !matches!(self.root, Value::Object(_)) {
            self.root = Value::object(Object::new());
        }
        if let Value::Object(map) = &mut self.root {
            Arc::make_mut(map).insert(key.into(), value.into());
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Registers a host function under a top-level name.
    pub fn with_function<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.with(name, Value::function(f))
    }
}

impl From<Value> for Scope {
    fn from(root: Value) -> Self {
        Scope::new(root)
    }
}

impl From<serde_json::Value> for Scope {
    fn from(root: serde_json::Value) -> Self {
        Scope::from_json(root)
    }
}
