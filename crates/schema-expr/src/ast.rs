//! Expression syntax tree.

use crate::operators::{BinaryOp, UnaryOp};
use crate::types::Value;
use crate::util;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    /// Variable path resolved against the scope.
    Path(String),
    /// Call of a scope function by (dotted) name.
    Call { callee: String, args: Vec<Expr> },
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// Left-associative run of operators from a single precedence tier:
    /// `head op1 e1 op2 e2 ...` means `((head op1 e1) op2 e2) ...`.
    Binary {
        head: Box<Expr>,
        tail: Vec<(BinaryOp, Expr)>,
    },
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
}

impl Expr {
    /// Names of every function called anywhere in the expression, in source
    /// order, duplicates included.
    pub fn callees(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_callees(&mut out);
        out
    }

    fn collect_callees<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Literal(_) | Expr::Path(_) => {}
            Expr::Call { callee, args } => {
                out.push(callee);
                for arg in args {
                    arg.collect_callees(out);
                }
            }
            Expr::Unary { operand, .. } => operand.collect_callees(out),
            Expr::Binary { head, tail } => {
                head.collect_callees(out);
                for (_, e) in tail {
                    e.collect_callees(out);
                }
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                test.collect_callees(out);
                consequent.collect_callees(out);
                alternate.collect_callees(out);
            }
        }
    }
}

/// Fully parenthesized rendering, handy for checking how input was grouped.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(Value::String(s)) => {
                write!(f, "{}", serde_json::Value::String(s.clone()))
            }
            Expr::Literal(v) => f.write_str(&util::to_js_string(v)),
            Expr::Path(p) => f.write_str(p),
            Expr::Call { callee, args } => {
                write!(f, "{}(", callee)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Expr::Unary { op, operand } => write!(f, "{}{}", op.symbol(), operand),
            Expr::Binary { head, tail } => {
                for _ in tail {
                    f.write_str("(")?;
                }
                write!(f, "{}", head)?;
                for (op, e) in tail {
                    write!(f, " {} {})", op.symbol(), e)?;
                }
                Ok(())
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => write!(f, "({} ? {} : {})", test, consequent, alternate),
        }
    }
}
