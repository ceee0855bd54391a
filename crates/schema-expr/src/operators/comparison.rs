//! Relational and equality operators.

use crate::types::Value;
use crate::util;
use std::cmp::Ordering;

pub fn gt(a: &Value, b: &Value) -> Value {
    Value::Bool(util::compare(a, b) == Some(Ordering::Greater))
}

pub fn lt(a: &Value, b: &Value) -> Value {
    Value::Bool(util::compare(a, b) == Some(Ordering::Less))
}

pub fn ge(a: &Value, b: &Value) -> Value {
    Value::Bool(matches!(
        util::compare(a, b),
        Some(Ordering::Greater | Ordering::Equal)
    ))
}

pub fn le(a: &Value, b: &Value) -> Value {
    Value::Bool(matches!(
        util::compare(a, b),
        Some(Ordering::Less | Ordering::Equal)
    ))
}

pub fn eq(a: &Value, b: &Value) -> Value {
    Value::Bool(util::loose_equals(a, b))
}

pub fn ne(a: &Value, b: &Value) -> Value {
    Value::Bool(!util::loose_equals(a, b))
}

pub fn strict_eq(a: &Value, b: &Value) -> Value {
    Value::Bool(util::strict_equals(a, b))
}

pub fn strict_ne(a: &Value, b: &Value) -> Value {
    Value::Bool(!util::strict_equals(a, b))
}
