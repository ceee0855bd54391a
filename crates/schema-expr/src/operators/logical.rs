//! Logical operators. `&&` and `||` return one of their operands, not a
//! coerced boolean.

use crate::types::Value;
use crate::util;

pub fn not(a: &Value) -> Value {
    Value::Bool(!util::is_truthy(a))
}

pub fn and(a: &Value, b: &Value) -> Value {
    if util::is_truthy(a) {
        b.clone()
    } else {
        a.clone()
    }
}

pub fn or(a: &Value, b: &Value) -> Value {
    if util::is_truthy(a) {
        a.clone()
    } else {
        b.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_operands() {
        assert_eq!(and(&Value::Number(1.0), &Value::from("x")), Value::from("x"));
        assert_eq!(and(&Value::from(""), &Value::from("x")), Value::from(""));
        assert_eq!(or(&Value::Null, &Value::Number(0.0)), Value::Number(0.0));
        assert_eq!(or(&Value::from("a"), &Value::from("b")), Value::from("a"));
    }

    #[test]
    fn not_uses_truthiness() {
        assert_eq!(not(&Value::Undefined), Value::Bool(true));
        assert_eq!(not(&Value::from("0")), Value::Bool(false));
    }
}
