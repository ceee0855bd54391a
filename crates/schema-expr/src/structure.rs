//! String-level structural matching of function calls and argument lists.
//!
//! These work on raw expression text without tokenizing it, which is what
//! schema tooling needs to inspect or rewrite calls inside authored strings.

use crate::lexer::{is_ident_char, is_ident_start};
use std::ops::Range;

/// A function call located in expression text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    /// The whole call, `name(args)`.
    pub full_match: String,
    /// The (possibly dotted) function name.
    pub function_name: String,
    /// Text between the outer parentheses.
    pub args_text: String,
    /// Byte range of `full_match` in the input.
    pub span: Range<usize>,
}

impl FunctionCall {
    /// Splits `args_text` into top-level arguments.
    pub fn arguments(&self) -> Vec<String> {
        split_arguments(&self.args_text)
    }
}

/// Returns the index just past the (possibly dotted) name starting at `start`.
/// Names follow the same identifier rule as the tokenizer.
fn scan_name(expr: &str, start: usize) -> usize {
    let mut i = start;
    let mut chars = expr[start..].chars().peekable();
    while let Some(c) = chars.next() {
        let continues = is_ident_char(c)
            || (c == '.' && chars.peek().is_some_and(|next| is_ident_char(*next)));
        if !continues {
            break;
        }
        i += c.len_utf8();
    }
    i
}

/// Returns the index just past the string literal opening at `start`.
/// Unterminated strings run to the end of input.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Finds the `)` matching the `(` at `open`, counting depth and skipping
/// quoted strings.
fn matching_paren(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Finds the leftmost function call in `expr`.
///
/// A call is an identifier, optionally dotted, immediately followed by `(`.
/// Names inside string literals are ignored. Returns `None` when there is no
/// call or its parentheses never balance.
///
/// ```
/// use schema_expr::structure::find_first_function_call;
///
/// let call = find_first_function_call("1 + fmt.money(add(a, 2), 'USD')").unwrap();
/// assert_eq!(call.function_name, "fmt.money");
/// assert_eq!(call.args_text, "add(a, 2), 'USD'");
/// assert_eq!(call.span, 4..31);
/// ```
pub fn find_first_function_call(expr: &str) -> Option<FunctionCall> {
    let bytes = expr.as_bytes();
    let mut i = 0;
    while let Some(c) = expr[i..].chars().next() {
        if c == '"' || c == '\'' {
            i = skip_string(bytes, i);
            continue;
        }
        if !is_ident_start(c) {
            i += c.len_utf8();
            continue;
        }
        let start = i;
        i = scan_name(expr, i);
        if bytes.get(i) != Some(&b'(') {
            continue;
        }
        let close = matching_paren(bytes, i)?;
        return Some(FunctionCall {
            full_match: expr[start..=close].to_string(),
            function_name: expr[start..i].to_string(),
            args_text: expr[i + 1..close].to_string(),
            span: start..close + 1,
        });
    }
    None
}

/// Splits an argument list on top-level commas.
///
/// Commas nested in parentheses or inside quoted strings (either quote style,
/// with `\"` / `\'` escapes) do not split. Pieces are trimmed; empty input
/// gives no arguments.
///
/// ```
/// use schema_expr::structure::split_arguments;
///
/// assert_eq!(split_arguments(r#""a,b", g(1,2)"#), vec![r#""a,b""#, "g(1,2)"]);
/// assert!(split_arguments("  ").is_empty());
/// ```
pub fn split_arguments(args_text: &str) -> Vec<String> {
    if args_text.trim().is_empty() {
        return Vec::new();
    }
    let bytes = args_text.as_bytes();
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                args.push(args_text[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    args.push(args_text[start..].trim().to_string());
    args
}
