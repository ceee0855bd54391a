//! Host-style value coercions shared by the operators.

use crate::types::Value;
use std::cmp::Ordering;

// ----------------------------------------------------------------- Truthiness

/// Returns true if a value is truthy under host rules.
///
/// Falsy: `undefined`, `null`, `false`, `0`, `-0`, `NaN`, `""`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) | Value::Function(_) => true,
    }
}

// ----------------------------------------------------------------- Primitives

/// Converts containers and functions to their primitive (string) form.
///
/// Arrays join their elements with `,`, objects become `[object Object]`.
/// Primitives pass through unchanged.
pub fn to_primitive(value: &Value) -> Value {
    match value {
        Value::Array(_) | Value::Object(_) | Value::Function(_) => {
            Value::String(to_js_string(value))
        }
        other => other.clone(),
    }
}

/// Converts a value to a number. `undefined` and non-numeric text give NaN.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => *n,
        Value::String(s) => string_to_number(s),
        Value::Array(_) => string_to_number(&to_js_string(value)),
        Value::Object(_) | Value::Function(_) => f64::NAN,
    }
}

/// Parses numeric text the way the host's `Number(text)` does.
pub fn string_to_number(s: &str) -> f64 {
    let t = s.trim();
    if t.is_empty() {
        return 0.0;
    }
    match t {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let radix = match t.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&t[2..], radix)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }
    // Rust also accepts "inf", "nan" and friends; the host does not.
    if t.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }
    t.parse::<f64>().unwrap_or(f64::NAN)
}

/// Converts a value to a string the way the host's `String(value)` does.
pub fn to_js_string(value: &Value) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(*n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Undefined | Value::Null => String::new(),
                other => to_js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
        Value::Function(_) => "function () { [native code] }".to_string(),
    }
}

/// Formats a number like the host: integers without a fraction, exponent
/// notation outside `[1e-6, 1e21)`.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        if n.fract() == 0.0 {
            return format!("{:.0}", n);
        }
        return format!("{}", n);
    }
    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, e)) if !e.starts_with('-') => format!("{}e+{}", mantissa, e),
        _ => exp,
    }
}

// ----------------------------------------------------------------- Comparison

/// Abstract relational comparison. `None` means "undefined" (a NaN operand),
/// which makes every ordering operator return false.
pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    let pa = to_primitive(a);
    let pb = to_primitive(b);
    if let (Value::String(sa), Value::String(sb)) = (&pa, &pb) {
        return Some(sa.encode_utf16().cmp(sb.encode_utf16()));
    }
    to_number(&pa).partial_cmp(&to_number(&pb))
}

/// Strict equality: same variant and same value, containers by identity.
pub fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) => true,
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => std::sync::Arc::ptr_eq(x, y),
        (Value::Object(x), Value::Object(y)) => std::sync::Arc::ptr_eq(x, y),
        (Value::Function(x), Value::Function(y)) => x.ptr_eq(y),
        _ => false,
    }
}

/// Loose equality with implicit coercion.
pub fn loose_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined | Value::Null, Value::Undefined | Value::Null) => true,
        (Value::Undefined | Value::Null, _) | (_, Value::Undefined | Value::Null) => false,
        (Value::Number(x), Value::String(s)) => *x == string_to_number(s),
        (Value::String(s), Value::Number(y)) => string_to_number(s) == *y,
        (Value::Bool(_), _) => loose_equals(&Value::Number(to_number(a)), b),
        (_, Value::Bool(_)) => loose_equals(a, &Value::Number(to_number(b))),
        (Value::Array(_) | Value::Object(_) | Value::Function(_), Value::Number(_) | Value::String(_)) => {
            loose_equals(&to_primitive(a), b)
        }
        (Value::Number(_) | Value::String(_), Value::Array(_) | Value::Object(_) | Value::Function(_)) => {
            loose_equals(a, &to_primitive(b))
        }
        _ => strict_equals(a, b),
    }
}
