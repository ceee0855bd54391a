//! Dotted / bracket path lookup into a scope tree.
//!
//! ```
//! use schema_expr::path::{get_path, parse_path};
//! use schema_expr::Value;
//! use serde_json::json;
//!
//! assert_eq!(parse_path("a.b[0]['c d']"), vec!["a", "b", "0", "c d"]);
//!
//! let doc = Value::from(json!({"a": {"b": [{"c d": 42}]}}));
//! assert_eq!(get_path(&doc, "a.b[0]['c d']"), Value::Number(42.0));
//! assert_eq!(get_path(&doc, "a.missing.x"), Value::Undefined);
//! ```

use crate::types::Value;

/// A step in a parsed path.
pub type PathStep = String;

/// Splits a path into its steps.
///
/// Accepts `a.b`, `a[0]`, `a["k"]` and `a['k']`; quoted bracket keys may
/// contain dots and escaped quotes. Malformed input is split best-effort and
/// never fails.
pub fn parse_path(path: &str) -> Vec<PathStep> {
    let chars: Vec<char> = path.chars().collect();
    let mut steps = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '.' => {
                if !current.is_empty() || (i > 0 && chars[i - 1] == '.') {
                    steps.push(std::mem::take(&mut current));
                }
                i += 1;
            }
            '[' => {
                if !current.is_empty() {
                    steps.push(std::mem::take(&mut current));
                }
                i += 1;
                let (key, next) = parse_bracket(&chars, i);
                steps.push(key);
                i = next;
            }
            c => {
                current.push(c);
                i += 1;
            }
        }
    }
    if !current.is_empty() {
        steps.push(current);
    }
    steps
}

/// Reads a bracket segment starting after `[`. Returns the key and the index
/// just past the closing `]`.
fn parse_bracket(chars: &[char], start: usize) -> (PathStep, usize) {
    let mut i = start;
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    if let Some(&quote) = chars.get(i).filter(|c| **c == '"' || **c == '\'') {
        let mut key = String::new();
        i += 1;
        while i < chars.len() && chars[i] != quote {
            if chars[i] == '\\' && i + 1 < chars.len() {
                i += 1;
            }
            key.push(chars[i]);
            i += 1;
        }
        // Skip the closing quote and anything up to `]`.
        while i < chars.len() && chars[i] != ']' {
            i += 1;
        }
        return (key, (i + 1).min(chars.len()));
    }
    let mut key = String::new();
    while i < chars.len() && chars[i] != ']' {
        key.push(chars[i]);
        i += 1;
    }
    (key.trim().to_string(), (i + 1).min(chars.len()))
}

/// Resolves one step against a value.
///
/// Numeric steps index arrays and strings; `length` reports the length of
/// arrays and strings.
pub fn get_step(val: &Value, step: &str) -> Option<Value> {
    match val {
        Value::Object(map) => map.get(step).cloned(),
        Value::Array(items) => {
            if step == "length" {
                return Some(Value::Number(items.len() as f64));
            }
            let idx = parse_index(step)?;
            items.get(idx).cloned()
        }
        Value::String(s) => {
            if step == "length" {
                return Some(Value::Number(s.encode_utf16().count() as f64));
            }
            // Indexes count UTF-16 units, like `length`.
            let idx = parse_index(step)?;
            s.encode_utf16()
                .nth(idx)
                .map(|unit| Value::String(String::from_utf16_lossy(&[unit])))
        }
        _ => None,
    }
}

fn parse_index(step: &str) -> Option<usize> {
    let bytes = step.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    step.parse().ok()
}

/// Walks parsed steps from `val`. Returns `None` as soon as a step is missing.
pub fn get(val: &Value, path: &[PathStep]) -> Option<Value> {
    let Some((first, rest)) = path.split_first() else {
        return Some(val.clone());
    };
    let mut current = get_step(val, first)?;
    for step in rest {
        current = get_step(&current, step)?;
    }
    Some(current)
}

/// Looks up a dotted / bracket path, returning `Value::Undefined` when any
/// segment is missing.
///
/// A key equal to the whole path takes precedence over splitting it, so
/// `{"a.b": 1}` resolves `a.b` to `1`.
pub fn get_path(root: &Value, path: &str) -> Value {
    if let Value::Object(map) = root {
        if let Some(v) = map.get(path) {
            return v.clone();
        }
    }
    let steps = parse_path(path);
    if steps.is_empty() {
        return Value::Undefined;
    }
    get(root, &steps).unwrap_or(Value::Undefined)
}
