//! Operator table and the `apply` primitive.
//!
//! Binary operators are grouped into precedence tiers; the parser climbs the
//! tiers from [`Tier::Logical`] (loosest) to [`Tier::Multiplicative`]
//! (tightest). Every tier is left-associative, including comparisons, so
//! `a > b > c` means `(a > b) > c`.

pub mod arithmetic;
pub mod comparison;
pub mod logical;

use crate::types::Value;

/// Binary precedence tier. Larger binds tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    /// `&&` `||`, one shared tier.
    Logical = 1,
    /// `> < >= <= == === != !==`, one shared tier.
    Comparison = 2,
    /// `+ -`
    Additive = 3,
    /// `* / %`
    Multiplicative = 4,
}

impl Tier {
    pub const LOOSEST: Tier = Tier::Logical;

    /// The next tighter tier, or `None` above multiplicative (unary operands).
    pub fn tighter(self) -> Option<Tier> {
        match self {
            Tier::Logical => Some(Tier::Comparison),
            Tier::Comparison => Some(Tier::Additive),
            Tier::Additive => Some(Tier::Multiplicative),
            Tier::Multiplicative => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    StrictEq,
    Ne,
    StrictNe,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
}

/// Signature shared by every binary operator implementation.
pub type BinaryFn = fn(&Value, &Value) -> Value;

/// One row of the operator table.
pub struct OperatorDefinition {
    pub op: BinaryOp,
    pub symbol: &'static str,
    pub tier: Tier,
    pub eval_fn: BinaryFn,
}

/// Every binary operator, one row per [`BinaryOp`] variant in declaration order.
pub static OPERATORS: &[OperatorDefinition] = &[
    OperatorDefinition { op: BinaryOp::Mul, symbol: "*", tier: Tier::Multiplicative, eval_fn: arithmetic::mul },
    OperatorDefinition { op: BinaryOp::Div, symbol: "/", tier: Tier::Multiplicative, eval_fn: arithmetic::div },
    OperatorDefinition { op: BinaryOp::Rem, symbol: "%", tier: Tier::Multiplicative, eval_fn: arithmetic::rem },
    OperatorDefinition { op: BinaryOp::Add, symbol: "+", tier: Tier::Additive, eval_fn: arithmetic::add },
    OperatorDefinition { op: BinaryOp::Sub, symbol: "-", tier: Tier::Additive, eval_fn: arithmetic::sub },
    OperatorDefinition { op: BinaryOp::Gt, symbol: ">", tier: Tier::Comparison, eval_fn: comparison::gt },
    OperatorDefinition { op: BinaryOp::Lt, symbol: "<", tier: Tier::Comparison, eval_fn: comparison::lt },
    OperatorDefinition { op: BinaryOp::Ge, symbol: ">=", tier: Tier::Comparison, eval_fn: comparison::ge },
    OperatorDefinition { op: BinaryOp::Le, symbol: "<=", tier: Tier::Comparison, eval_fn: comparison::le },
    OperatorDefinition { op: BinaryOp::Eq, symbol: "==", tier: Tier::Comparison, eval_fn: comparison::eq },
    OperatorDefinition { op: BinaryOp::StrictEq, symbol: "===", tier: Tier::Comparison, eval_fn: comparison::strict_eq },
    OperatorDefinition { op: BinaryOp::Ne, symbol: "!=", tier: Tier::Comparison, eval_fn: comparison::ne },
    OperatorDefinition { op: BinaryOp::StrictNe, symbol: "!==", tier: Tier::Comparison, eval_fn: comparison::strict_ne },
    OperatorDefinition { op: BinaryOp::And, symbol: "&&", tier: Tier::Logical, eval_fn: logical::and },
    OperatorDefinition { op: BinaryOp::Or, symbol: "||", tier: Tier::Logical, eval_fn: logical::or },
];

impl BinaryOp {
    pub fn definition(self) -> &'static OperatorDefinition {
        // Table rows follow the enum's declaration order.
        &OPERATORS[self as usize]
    }

    pub fn from_symbol(symbol: &str) -> Option<BinaryOp> {
        OPERATORS.iter().find(|def| def.symbol == symbol).map(|def| def.op)
    }

    pub fn symbol(self) -> &'static str {
        self.definition().symbol
    }

    pub fn tier(self) -> Tier {
        self.definition().tier
    }

    /// Applies the operator to two already-evaluated operands.
    pub fn eval(self, a: &Value, b: &Value) -> Value {
        (self.definition().eval_fn)(a, b)
    }
}

impl UnaryOp {
    pub fn from_symbol(symbol: &str) -> Option<UnaryOp> {
        match symbol {
            "!" => Some(UnaryOp::Not),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
        }
    }

    pub fn eval(self, a: &Value) -> Value {
        match self {
            UnaryOp::Not => logical::not(a),
        }
    }
}

/// Applies `operator` to already-evaluated operands.
///
/// `!` ignores `b`; a binary operator with no `b` sees `undefined`. An
/// unknown operator yields `undefined`.
///
/// ```
/// use schema_expr::{apply, Value};
///
/// assert_eq!(apply("+", Value::from("a"), Some(Value::Number(1.0))), Value::from("a1"));
/// assert_eq!(apply("||", Value::Number(0.0), Some(Value::from("x"))), Value::from("x"));
/// assert_eq!(apply("!", Value::from(""), None), Value::Bool(true));
/// assert_eq!(apply("<<", Value::Number(1.0), Some(Value::Number(2.0))), Value::Undefined);
/// ```
pub fn apply(operator: &str, a: Value, b: Option<Value>) -> Value {
    if let Some(op) = UnaryOp::from_symbol(operator) {
        return op.eval(&a);
    }
    match BinaryOp::from_symbol(operator) {
        Some(op) => op.eval(&a, &b.unwrap_or(Value::Undefined)),
        None => {
            tracing::debug!(operator, "unknown operator");
            Value::Undefined
        }
    }
}
