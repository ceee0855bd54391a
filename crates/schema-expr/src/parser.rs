//! Precedence-climbing parser.
//!
//! Grammar, loosest first:
//!
//! ```text
//! conditional := binary(Logical) ( "?" conditional ":" conditional )?
//! binary(t)   := operand(t) ( op_t operand(t) )*
//! operand(t)  := binary(t + 1) | unary            (unary above Multiplicative)
//! unary       := "!" unary | primary
//! primary     := literal | path | callee "(" args? ")" | "(" conditional ")"
//! args        := conditional ( "," conditional )*
//! ```

use crate::ast::Expr;
use crate::error::ParseError;
use crate::eval_ctx::EvalOptions;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::operators::{Tier, UnaryOp};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser {
    /// Parses `input` with default limits.
    pub fn parse(input: &str) -> Result<Expr, ParseError> {
        Self::parse_with(input, &EvalOptions::default())
    }

    pub fn parse_with(input: &str, options: &EvalOptions) -> Result<Expr, ParseError> {
        if input.len() > options.max_length {
            return Err(ParseError::TooLong {
                len: input.len(),
                max: options.max_length,
            });
        }
        let tokens = Lexer::tokenize(input)?;
        let mut parser = Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth: options.max_depth,
        };
        let expr = parser.parse_conditional()?;
        match parser.tokens.get(parser.pos) {
            None => Ok(expr),
            Some(tok) => Err(unexpected(tok)),
        }
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        Some(tok)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        match self.next() {
            Some(tok) if &tok.kind == kind => Ok(()),
            Some(tok) => Err(unexpected(&tok)),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::TooDeep(self.max_depth));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_conditional(&mut self) -> Result<Expr, ParseError> {
        self.enter()?;
        let test = self.parse_binary(Tier::LOOSEST)?;
        let expr = if self.eat(&TokenKind::Question) {
            let consequent = self.parse_conditional()?;
            self.expect(&TokenKind::Colon)?;
            let alternate = self.parse_conditional()?;
            Expr::Conditional {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
            }
        } else {
            test
        };
        self.leave();
        Ok(expr)
    }

    fn parse_operand(&mut self, tier: Tier) -> Result<Expr, ParseError> {
        match tier.tighter() {
            Some(next) => self.parse_binary(next),
            None => self.parse_unary(),
        }
    }

    fn parse_binary(&mut self, tier: Tier) -> Result<Expr, ParseError> {
        let head = self.parse_operand(tier)?;
        let mut tail = Vec::new();
        loop {
            let op = match self.peek() {
                Some(TokenKind::Binary(op)) if op.tier() == tier => *op,
                _ => break,
            };
            self.pos += 1;
            tail.push((op, self.parse_operand(tier)?));
        }
        if tail.is_empty() {
            return Ok(head);
        }
        Ok(Expr::Binary {
            head: Box::new(head),
            tail,
        })
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if !self.eat(&TokenKind::Bang) {
            return self.parse_primary();
        }
        self.enter()?;
        let operand = self.parse_unary()?;
        self.leave();
        Ok(Expr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(operand),
        })
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let tok = self.next().ok_or(ParseError::UnexpectedEnd)?;
        match tok.kind {
            TokenKind::Literal(value) => Ok(Expr::Literal(value)),
            TokenKind::Path(path) => Ok(Expr::Path(path)),
            TokenKind::Callee(callee) => {
                self.expect(&TokenKind::LParen)?;
                let args = self.parse_args()?;
                Ok(Expr::Call { callee, args })
            }
            TokenKind::LParen => {
                let inner = self.parse_conditional()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(unexpected(&tok)),
        }
    }

    fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if self.eat(&TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_conditional()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }
}

fn unexpected(tok: &Token) -> ParseError {
    ParseError::UnexpectedToken {
        found: tok.kind.describe(),
        pos: tok.pos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grouped(input: &str) -> String {
        Parser::parse(input)
            .unwrap_or_else(|e| panic!("parse({input:?}) failed: {e}"))
            .to_string()
    }

    #[test]
    fn arithmetic_precedence() {
        assert_eq!(grouped("1 + 2 * 3"), "(1 + (2 * 3))");
        assert_eq!(grouped("1 - 2 - 3"), "((1 - 2) - 3)");
        assert_eq!(grouped("(1 + 2) * 3 % 4"), "(((1 + 2) * 3) % 4)");
    }

    #[test]
    fn comparisons_chain_left_to_right() {
        assert_eq!(grouped("a > b > c"), "((a > b) > c)");
        assert_eq!(grouped("a == b < c"), "((a == b) < c)");
        assert_eq!(grouped("a + 1 >= b * 2"), "((a + 1) >= (b * 2))");
    }

    #[test]
    fn logical_operators_share_a_tier() {
        assert_eq!(grouped("a || b && c"), "((a || b) && c)");
        assert_eq!(grouped("a && b || c"), "((a && b) || c)");
    }

    #[test]
    fn conditional_binds_loosest_and_nests_right() {
        assert_eq!(grouped("a||b?c:d"), "((a || b) ? c : d)");
        assert_eq!(grouped("a?b:c?d:e"), "(a ? b : (c ? d : e))");
        assert_eq!(grouped("a ? (b ? 1 : 2) : 3"), "(a ? (b ? 1 : 2) : 3)");
    }

    #[test]
    fn ternary_in_consequent_closes_on_its_own_colon() {
        assert_eq!(grouped("a ? b ? 1 : 2 : 3"), "(a ? (b ? 1 : 2) : 3)");
        assert_eq!(grouped("a ? b ? 1 : 2 : c ? 3 : 4"), "(a ? (b ? 1 : 2) : (c ? 3 : 4))");
    }

    #[test]
    fn unary_not_binds_tightest() {
        assert_eq!(grouped("!a && b"), "(!a && b)");
        assert_eq!(grouped("!!a"), "!!a");
        assert_eq!(grouped("!(a && b)"), "!(a && b)");
    }

    #[test]
    fn calls() {
        assert_eq!(grouped("add(x, multiply(y, 2))"), "add(x, multiply(y, 2))");
        assert_eq!(grouped("now()"), "now()");
        assert_eq!(grouped("fmt.date(d, 'YYYY') + 1"), "(fmt.date(d, \"YYYY\") + 1)");
        assert_eq!(grouped("f(a ? 1 : 2)"), "f((a ? 1 : 2))");
    }

    #[test]
    fn callees_in_source_order() {
        let expr = Parser::parse("f(g(1), h) + g(2)").unwrap();
        assert_eq!(expr.callees(), vec!["f", "g", "g"]);
    }

    #[test]
    fn malformed_input() {
        assert_eq!(Parser::parse(""), Err(ParseError::UnexpectedEnd));
        assert_eq!(Parser::parse("(1 + 2"), Err(ParseError::UnexpectedEnd));
        assert_eq!(Parser::parse("1 +"), Err(ParseError::UnexpectedEnd));
        assert_eq!(
            Parser::parse("1 + 2)"),
            Err(ParseError::UnexpectedToken {
                found: ")".into(),
                pos: 5
            })
        );
        assert!(matches!(
            Parser::parse("a ? b"),
            Err(ParseError::UnexpectedEnd)
        ));
        assert!(matches!(
            Parser::parse("f(1,)"),
            Err(ParseError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            Parser::parse("a b"),
            Err(ParseError::UnexpectedToken { pos: 2, .. })
        ));
    }

    #[test]
    fn nesting_limit() {
        let deep = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(Parser::parse(&deep), Err(ParseError::TooDeep(128)));
        let options = EvalOptions::default().with_max_depth(512);
        assert!(Parser::parse_with(&deep, &options).is_ok());
        let bangs = format!("{}a", "!".repeat(300));
        assert_eq!(Parser::parse(&bangs), Err(ParseError::TooDeep(128)));
    }

    #[test]
    fn long_operator_chains_stay_flat() {
        let chain = vec!["1"; 5000].join(" + ");
        let expr = Parser::parse(&chain).unwrap();
        let Expr::Binary { tail, .. } = expr else {
            panic!("expected a binary chain");
        };
        assert_eq!(tail.len(), 4999);
    }

    #[test]
    fn length_limit() {
        let options = EvalOptions::default().with_max_length(4);
        assert_eq!(
            Parser::parse_with("1 + 22", &options),
            Err(ParseError::TooLong { len: 6, max: 4 })
        );
    }
}
