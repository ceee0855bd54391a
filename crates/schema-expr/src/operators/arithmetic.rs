//! Arithmetic operators.
//!
//! `+` concatenates when either operand is (or converts to) a string;
//! everything else goes through numeric coercion. Division by zero follows
//! IEEE 754 and never errors.

use crate::types::Value;
use crate::util;

pub fn add(a: &Value, b: &Value) -> Value {
    let pa = util::to_primitive(a);
    let pb = util::to_primitive(b);
    if matches!(pa, Value::String(_)) || matches!(pb, Value::String(_)) {
        let mut s = util::to_js_string(&pa);
        s.push_str(&util::to_js_string(&pb));
        return Value::String(s);
    }
    Value::Number(util::to_number(&pa) + util::to_number(&pb))
}

pub fn sub(a: &Value, b: &Value) -> Value {
    Value::Number(util::to_number(a) - util::to_number(b))
}

pub fn mul(a: &Value, b: &Value) -> Value {
    Value::Number(util::to_number(a) * util::to_number(b))
}

pub fn div(a: &Value, b: &Value) -> Value {
    Value::Number(util::to_number(a) / util::to_number(b))
}

/// Truncated remainder; the sign follows the dividend.
pub fn rem(a: &Value, b: &Value) -> Value {
    Value::Number(util::to_number(a) % util::to_number(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn num(v: Value) -> f64 {
        v.as_f64().unwrap_or_else(|| panic!("expected number, got {:?}", v))
    }

    #[test]
    fn add_dispatches_on_operand_types() {
        assert_eq!(add(&Value::Number(1.0), &Value::Number(2.0)), Value::Number(3.0));
        assert_eq!(add(&Value::from("a"), &Value::Number(1.0)), Value::from("a1"));
        assert_eq!(add(&Value::Number(1.5), &Value::from("b")), Value::from("1.5b"));
        assert_eq!(add(&Value::Bool(true), &Value::Number(1.0)), Value::Number(2.0));
        assert_eq!(add(&Value::Null, &Value::Number(1.0)), Value::Number(1.0));
        assert_eq!(add(&Value::from(json!([1, 2])), &Value::Number(3.0)), Value::from("1,23"));
        assert_eq!(add(&Value::Undefined, &Value::from("x")), Value::from("undefinedx"));
        assert!(num(add(&Value::Undefined, &Value::Number(1.0))).is_nan());
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(sub(&Value::from("5"), &Value::Number(2.0)), Value::Number(3.0));
        assert_eq!(mul(&Value::from("3"), &Value::from("4")), Value::Number(12.0));
        assert!(num(mul(&Value::from("x"), &Value::Number(2.0))).is_nan());
    }

    #[test]
    fn division_edges() {
        assert_eq!(div(&Value::Number(1.0), &Value::Number(0.0)), Value::Number(f64::INFINITY));
        assert_eq!(div(&Value::Number(-1.0), &Value::Number(0.0)), Value::Number(f64::NEG_INFINITY));
        assert!(num(div(&Value::Number(0.0), &Value::Number(0.0))).is_nan());
        assert_eq!(rem(&Value::Number(-7.0), &Value::Number(3.0)), Value::Number(-1.0));
        assert_eq!(rem(&Value::Number(5.5), &Value::Number(2.0)), Value::Number(1.5));
        assert!(num(rem(&Value::Number(1.0), &Value::Number(0.0))).is_nan());
    }
}
