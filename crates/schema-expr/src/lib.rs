//! Sandbox-safe expression evaluator for low-code UI schemas.
//!
//! # Overview
//!
//! Schemas drive visibility, computed labels and data bindings with small
//! C-like expressions such as `a > b ? a : b` or `add(x, multiply(y, 2))`.
//! Host runtimes that forbid `eval` still need those evaluated, so this crate
//! tokenizes, parses and walks them itself against a read-only [`Scope`].
//!
//! Supported: number / string / boolean literals, variable paths (`a.b[0]`),
//! calls of scope functions, `( )`, `?:`, `!`, `* / %`, `+ -`,
//! `> < >= <= == === != !==`, `&& ||`. Operator semantics follow the dynamic
//! host language (string concatenation on `+`, loose equality, truthiness).
//!
//! Two grouping rules are kept on purpose for compatibility with existing
//! schemas:
//! - comparisons share one left-associative tier, so `a > b > c` is
//!   `(a > b) > c`;
//! - `&&` and `||` share one left-associative tier, so `a || b && c` is
//!   `(a || b) && c`.
//!
//! # Example
//!
//! ```
//! use schema_expr::{evaluate, Scope, Value};
//! use serde_json::json;
//!
//! let scope = Scope::from_json(json!({"x": 5, "y": 3}))
//!     .with_function("add", |args| {
//!         schema_expr::apply("+", args[0].clone(), args.get(1).cloned())
//!     });
//!
//! assert_eq!(evaluate("add(x, y * 2)", &scope), Value::Number(11.0));
//! assert_eq!(evaluate("missing.path", &scope), Value::Undefined);
//! ```

pub mod ast;
pub mod error;
pub mod eval_ctx;
pub mod evaluate;
pub mod lexer;
pub mod literal;
pub mod operators;
pub mod parser;
pub mod path;
pub mod scope;
pub mod structure;
pub mod template;
pub mod types;
pub mod util;

// Re-export the core public API
pub use error::ParseError;
pub use eval_ctx::{EvalCtx, EvalOptions};
pub use evaluate::{evaluate, evaluate_with, Expression};
pub use literal::parse_literal;
pub use operators::{apply, BinaryOp, UnaryOp};
pub use path::get_path;
pub use scope::Scope;
pub use structure::{find_first_function_call, split_arguments, FunctionCall};
pub use template::{evaluate_template, evaluate_template_with, is_template};
pub use types::{Function, NativeFn, Object, Value};
