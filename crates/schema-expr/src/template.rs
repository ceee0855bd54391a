//! `{{ expression }}` bindings embedded in schema strings.
//!
//! A string that is exactly one binding, such as `"{{$record.age}}"`, evaluates
//! to the raw value so numbers and booleans survive. Any other text is
//! interpolated: each binding is replaced by the string form of its value, with
//! `undefined` and `null` rendering as empty text.

use crate::evaluate::evaluate_with;
use crate::eval_ctx::EvalOptions;
use crate::scope::Scope;
use crate::types::Value;
use regex::Regex;
use std::sync::OnceLock;

fn binding_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\{\{(.*?)\}\}").expect("valid binding pattern"))
}

fn single_binding_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*\{\{((?:[^}]|\}[^}])*)\}\}\s*$").expect("valid binding pattern")
    })
}

/// Returns true if `text` contains at least one `{{ … }}` binding.
pub fn is_template(text: &str) -> bool {
    binding_regex().is_match(text)
}

/// Evaluates the bindings in `text` against `scope`.
///
/// ```
/// use schema_expr::{evaluate_template, Scope, Value};
/// use serde_json::json;
///
/// let scope = Scope::from_json(json!({"$record": {"name": "Ada", "age": 36}}));
/// assert_eq!(evaluate_template("{{$record.age}}", &scope), Value::Number(36.0));
/// assert_eq!(
///     evaluate_template("Hi {{$record.name}} ({{$record.age + 1}})", &scope),
///     Value::from("Hi Ada (37)")
/// );
/// ```
pub fn evaluate_template(text: &str, scope: &Scope) -> Value {
    evaluate_template_with(text, scope, &EvalOptions::default())
}

pub fn evaluate_template_with(text: &str, scope: &Scope, options: &EvalOptions) -> Value {
    if let Some(caps) = single_binding_regex().captures(text) {
        return evaluate_with(&caps[1], scope, options);
    }
    let rendered = binding_regex().replace_all(text, |caps: &regex::Captures<'_>| {
        match evaluate_with(&caps[1], scope, options) {
            Value::Undefined | Value::Null => String::new(),
            other => other.to_string(),
        }
    });
    Value::String(rendered.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scope() -> Scope {
        Scope::from_json(json!({
            "$record": {"email": "a@b.c", "active": true, "tags": ["x", "y"]},
            "n": 3
        }))
    }

    #[test]
    fn detects_bindings() {
        assert!(is_template("{{a}}"));
        assert!(is_template("x {{ a }} y"));
        assert!(!is_template("plain"));
        assert!(!is_template("{a}"));
    }

    #[test]
    fn single_binding_keeps_value_type() {
        assert_eq!(evaluate_template("{{$record.email}}", &scope()), Value::from("a@b.c"));
        assert_eq!(evaluate_template("  {{ $record.active }} ", &scope()), Value::Bool(true));
        assert_eq!(evaluate_template("{{n > 2}}", &scope()), Value::Bool(true));
        assert_eq!(evaluate_template("{{missing}}", &scope()), Value::Undefined);
    }

    #[test]
    fn interpolates_mixed_text() {
        assert_eq!(
            evaluate_template("{{n}} of {{$record.tags}}", &scope()),
            Value::from("3 of x,y")
        );
        assert_eq!(evaluate_template("[{{missing}}]", &scope()), Value::from("[]"));
        assert_eq!(evaluate_template("plain", &scope()), Value::from("plain"));
        assert_eq!(evaluate_template("x {{n +\n 1}}", &scope()), Value::from("x 4"));
        assert_eq!(evaluate_template("{{n +\n 1}}", &scope()), Value::Number(4.0));
    }

    #[test]
    fn two_adjacent_bindings_are_not_one() {
        assert_eq!(evaluate_template("{{n}}{{n}}", &scope()), Value::from("33"));
    }
}
