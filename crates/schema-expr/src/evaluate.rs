//! The `evaluate` entry points and the AST walker behind them.

use crate::ast::Expr;
use crate::error::ParseError;
use crate::eval_ctx::{EvalCtx, EvalOptions};
use crate::operators::BinaryOp;
use crate::parser::Parser;
use crate::scope::Scope;
use crate::types::Value;
use crate::util;
use std::fmt;
use std::str::FromStr;

/// Evaluates an expression string against a scope.
///
/// Never fails: empty input, malformed expressions, missing variables and
/// non-callable callees all come back as `Value::Undefined`.
///
/// ```
/// use schema_expr::{evaluate, Scope, Value};
/// use serde_json::json;
///
/// let scope = Scope::from_json(json!({"a": 2, "b": 1}));
/// assert_eq!(evaluate("a > b ? a : b", &scope), Value::Number(2.0));
/// assert_eq!(evaluate("a +", &scope), Value::Undefined);
/// ```
pub fn evaluate(expression: &str, scope: &Scope) -> Value {
    evaluate_with(expression, scope, &EvalOptions::default())
}

pub fn evaluate_with(expression: &str, scope: &Scope, options: &EvalOptions) -> Value {
    let source = expression.trim();
    if source.is_empty() {
        return Value::Undefined;
    }
    match Expression::parse_with(source, options) {
        Ok(expr) => expr.evaluate(scope),
        Err(err) => {
            tracing::debug!(%err, expression = source, "expression rejected");
            Value::Undefined
        }
    }
}

/// A parsed expression that can be evaluated many times.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    ast: Expr,
}

impl Expression {
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        Self::parse_with(source, &EvalOptions::default())
    }

    pub fn parse_with(source: &str, options: &EvalOptions) -> Result<Self, ParseError> {
        let ast = Parser::parse_with(source, options)?;
        Ok(Expression {
            source: source.to_string(),
            ast,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn ast(&self) -> &Expr {
        &self.ast
    }

    pub fn evaluate(&self, scope: &Scope) -> Value {
        eval_expr(&self.ast, &EvalCtx::new(scope))
    }
}

impl FromStr for Expression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Evaluates a syntax tree node.
pub fn eval_expr(expr: &Expr, ctx: &EvalCtx<'_>) -> Value {
    match expr {
        Expr::Literal(value) => value.clone(),
        Expr::Path(path) => ctx.scope.get(path),
        Expr::Call { callee, args } => eval_call(callee, args, ctx),
        Expr::Unary { op, operand } => op.eval(&eval_expr(operand, ctx)),
        Expr::Binary { head, tail } => {
            let mut acc = eval_expr(head, ctx);
            for (op, rhs) in tail {
                acc = match op {
                    BinaryOp::And if !util::is_truthy(&acc) => acc,
                    BinaryOp::Or if util::is_truthy(&acc) => acc,
                    BinaryOp::And | BinaryOp::Or => eval_expr(rhs, ctx),
                    _ => op.eval(&acc, &eval_expr(rhs, ctx)),
                };
            }
            acc
        }
        Expr::Conditional {
            test,
            consequent,
            alternate,
        } => {
            if util::is_truthy(&eval_expr(test, ctx)) {
                eval_expr(consequent, ctx)
            } else {
                eval_expr(alternate, ctx)
            }
        }
    }
}

/// Arguments are evaluated before the callee is resolved, left to right.
fn eval_call(callee: &str, args: &[Expr], ctx: &EvalCtx<'_>) -> Value {
    let values: Vec<Value> = args.iter().map(|arg| eval_expr(arg, ctx)).collect();
    match ctx.scope.get(callee) {
        Value::Function(f) => {
            tracing::trace!(callee, argc = values.len(), "calling scope function");
            f.call(&values)
        }
        other => {
            tracing::debug!(callee, found = other.type_name(), "callee is not a function");
            Value::Undefined
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn whitespace_only_is_undefined() {
        assert_eq!(evaluate("   ", &Scope::default()), Value::Undefined);
    }

    #[test]
    fn logical_operators_skip_unneeded_operands() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let scope = Scope::from_json(json!({"yes": true, "no": false})).with_function(
            "touch",
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Value::Bool(true)
            },
        );
        assert_eq!(evaluate("no && touch()", &scope), Value::Bool(false));
        assert_eq!(evaluate("yes || touch()", &scope), Value::Bool(true));
        assert_eq!(evaluate("yes ? 1 : touch()", &scope), Value::Number(1.0));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(evaluate("no || touch()", &scope), Value::Bool(true));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn skipped_operand_does_not_end_the_chain() {
        let scope = Scope::from_json(json!({"a": false, "c": "c"}));
        // ((a && missing) || c)
        assert_eq!(evaluate("a && missing || c", &scope), Value::from("c"));
    }

    #[test]
    fn compiled_expression_reuse() {
        let expr: Expression = "price * qty".parse().unwrap();
        assert_eq!(expr.source(), "price * qty");
        let one = Scope::from_json(json!({"price": 2.5, "qty": 4}));
        let two = Scope::from_json(json!({"price": 1, "qty": 3}));
        assert_eq!(expr.evaluate(&one), Value::Number(10.0));
        assert_eq!(expr.evaluate(&two), Value::Number(3.0));
    }

    #[test]
    fn parse_errors_surface_through_expression() {
        assert!(matches!(
            Expression::parse("1 = 1"),
            Err(ParseError::UnexpectedChar { ch: '=', pos: 2 })
        ));
    }
}
