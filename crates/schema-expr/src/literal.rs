//! Literal tokens: numbers, quoted strings, booleans.

use crate::types::Value;
use regex::Regex;
use std::sync::OnceLock;

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)$").expect("valid number pattern"))
}

/// Returns true if `token` is an optionally signed decimal number.
pub fn is_number(token: &str) -> bool {
    number_regex().is_match(token)
}

/// Parses a literal token.
///
/// Returns `None` for anything that is not a literal; the caller then treats
/// the token as a variable path or function name. Tokens must be trimmed.
///
/// ```
/// use schema_expr::literal::parse_literal;
/// use schema_expr::Value;
///
/// assert_eq!(parse_literal("-2.5"), Some(Value::Number(-2.5)));
/// assert_eq!(parse_literal("'a,b'"), Some(Value::from("a,b")));
/// assert_eq!(parse_literal("true"), Some(Value::Bool(true)));
/// assert_eq!(parse_literal("user.name"), None);
/// ```
pub fn parse_literal(token: &str) -> Option<Value> {
    match token {
        "" => None,
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        _ if is_number(token) => token.parse::<f64>().ok().map(Value::Number),
        _ => unquote(token).map(Value::String),
    }
}

/// Strips a matching pair of `"` or `'` from `token`, unescaping `\"`, `\'`
/// and `\\`. Returns `None` if the token is not exactly one quoted string.
pub fn unquote(token: &str) -> Option<String> {
    let quote = token.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    if token.len() < 2 || !token.ends_with(quote) {
        return None;
    }
    let inner = &token[1..token.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next @ ('"' | '\'' | '\\')) => out.push(next),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                // A trailing backslash escapes the closing quote.
                None => return None,
            },
            // An unescaped quote of the same kind ends the string early.
            c if c == quote => return None,
            c => out.push(c),
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(parse_literal("12"), Some(Value::Number(12.0)));
        assert_eq!(parse_literal("+4.5"), Some(Value::Number(4.5)));
        assert_eq!(parse_literal(".5"), Some(Value::Number(0.5)));
        assert_eq!(parse_literal("7."), Some(Value::Number(7.0)));
        assert_eq!(parse_literal("-0"), Some(Value::Number(-0.0)));
        assert_eq!(parse_literal("1.2.3"), None);
        assert_eq!(parse_literal("-"), None);
        assert_eq!(parse_literal("1e3"), None);
    }

    #[test]
    fn strings() {
        assert_eq!(parse_literal("\"hi\""), Some(Value::from("hi")));
        assert_eq!(parse_literal("''"), Some(Value::from("")));
        assert_eq!(parse_literal(r#""say \"hi\"""#), Some(Value::from("say \"hi\"")));
        assert_eq!(parse_literal(r"'a\nb'"), Some(Value::from("a\\nb")));
        assert_eq!(parse_literal("\"a'"), None);
        assert_eq!(parse_literal("\"a\" + \"b\""), None);
        assert_eq!(parse_literal("\""), None);
        assert_eq!(parse_literal(r#""a\""#), None);
    }

    #[test]
    fn booleans_and_others() {
        assert_eq!(parse_literal("false"), Some(Value::Bool(false)));
        assert_eq!(parse_literal("True"), None);
        assert_eq!(parse_literal("null"), None);
        assert_eq!(parse_literal(""), None);
        assert_eq!(parse_literal("a.b"), None);
    }
}
