//! Tokenizer for the expression grammar.

use crate::error::ParseError;
use crate::literal;
use crate::operators::BinaryOp;
use crate::types::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Number, string or boolean literal.
    Literal(Value),
    /// Variable path such as `a.b[0]`.
    Path(String),
    /// Function name immediately followed by `(`; the paren is a separate token.
    Callee(String),
    Binary(BinaryOp),
    Bang,
    LParen,
    RParen,
    Comma,
    Question,
    Colon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub pos: usize,
}

impl TokenKind {
    /// Text used in error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Literal(v) => v.to_string(),
            TokenKind::Path(p) | TokenKind::Callee(p) => p.clone(),
            TokenKind::Binary(op) => op.symbol().to_string(),
            TokenKind::Bang => "!".to_string(),
            TokenKind::LParen => "(".to_string(),
            TokenKind::RParen => ")".to_string(),
            TokenKind::Comma => ",".to_string(),
            TokenKind::Question => "?".to_string(),
            TokenKind::Colon => ":".to_string(),
        }
    }

    /// True when a following `+`/`-` can only be a sign, not an operator.
    fn expects_operand(prev: Option<&TokenKind>) -> bool {
        !matches!(
            prev,
            Some(TokenKind::Literal(_) | TokenKind::Path(_) | TokenKind::RParen)
        )
    }
}

/// Operators ordered longest first so `===` wins over `==` and `=`.
const OPERATORS: &[(&str, BinaryOp)] = &[
    ("===", BinaryOp::StrictEq),
    ("!==", BinaryOp::StrictNe),
    ("==", BinaryOp::Eq),
    ("!=", BinaryOp::Ne),
    (">=", BinaryOp::Ge),
    ("<=", BinaryOp::Le),
    ("&&", BinaryOp::And),
    ("||", BinaryOp::Or),
    (">", BinaryOp::Gt),
    ("<", BinaryOp::Lt),
    ("+", BinaryOp::Add),
    ("-", BinaryOp::Sub),
    ("*", BinaryOp::Mul),
    ("/", BinaryOp::Div),
    ("%", BinaryOp::Rem),
];

pub(crate) fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

pub(crate) fn is_ident_char(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric()
}

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Splits `input` into tokens.
    pub fn tokenize(input: &'a str) -> Result<Vec<Token>, ParseError> {
        let mut lexer = Self {
            input,
            pos: 0,
            tokens: Vec::new(),
        };
        lexer.run()?;
        Ok(lexer.tokens)
    }

    fn run(&mut self) -> Result<(), ParseError> {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
                continue;
            }
            let start = self.pos;
            let kind = match c {
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                ',' => self.single(TokenKind::Comma),
                '?' => self.single(TokenKind::Question),
                ':' => self.single(TokenKind::Colon),
                '"' | '\'' => self.string()?,
                c if c.is_ascii_digit() || (c == '.' && self.peek_digit_at(1)) => self.number()?,
                '+' | '-' if self.starts_signed_number() => self.number()?,
                c if is_ident_start(c) => self.word(),
                _ => self.operator()?,
            };
            self.tokens.push(Token { kind, pos: start });
        }
        Ok(())
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn peek_digit_at(&self, offset: usize) -> bool {
        self.peek_at(offset).is_some_and(|c| c.is_ascii_digit())
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// A `+` or `-` in operand position followed, after optional whitespace,
    /// by a digit or `.digit` starts a signed number.
    fn starts_signed_number(&self) -> bool {
        let mut rest = self.input[self.pos + 1..].trim_start().chars();
        let digit_follows = match rest.next() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => rest.next().is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        };
        digit_follows && TokenKind::expects_operand(self.tokens.last().map(|t| &t.kind))
    }

    fn number(&mut self) -> Result<TokenKind, ParseError> {
        let start = self.pos;
        let mut text = String::new();
        if let Some(sign @ ('+' | '-')) = self.peek() {
            self.advance();
            text.push(sign);
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }
        }
        let digits = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || c == '.' || is_ident_char(c))
        {
            self.advance();
        }
        text.push_str(&self.input[digits..self.pos]);
        match literal::parse_literal(&text) {
            Some(value @ Value::Number(_)) => Ok(TokenKind::Literal(value)),
            _ => Err(ParseError::InvalidNumber { text, pos: start }),
        }
    }

    /// Scans a quoted string. A backslash always skips the next character, so
    /// `\"` and `\'` never terminate the string.
    fn string(&mut self) -> Result<TokenKind, ParseError> {
        let start = self.pos;
        let quote = self.advance().ok_or(ParseError::UnexpectedEnd)?;
        loop {
            match self.advance() {
                None => return Err(ParseError::UnterminatedString(start)),
                Some('\\') => {
                    self.advance();
                }
                Some(c) if c == quote => break,
                Some(_) => {}
            }
        }
        let text = &self.input[start..self.pos];
        literal::unquote(text)
            .map(|s| TokenKind::Literal(Value::String(s)))
            .ok_or(ParseError::UnterminatedString(start))
    }

    /// Scans a dotted / bracketed path, then classifies it as a boolean
    /// literal, a callee or a variable path.
    fn word(&mut self) -> TokenKind {
        let start = self.pos;
        self.advance();
        loop {
            match self.peek() {
                Some(c) if is_ident_char(c) => {
                    self.advance();
                }
                Some('.') if self.peek_at(1).is_some_and(is_ident_char) => {
                    self.advance();
                }
                Some('[') => {
                    if !self.bracket() {
                        break;
                    }
                }
                _ => break,
            }
        }
        let text = &self.input[start..self.pos];
        match text {
            "true" => TokenKind::Literal(Value::Bool(true)),
            "false" => TokenKind::Literal(Value::Bool(false)),
            _ if self.peek() == Some('(') => TokenKind::Callee(text.to_string()),
            _ => TokenKind::Path(text.to_string()),
        }
    }

    /// Consumes a `[...]` path segment, skipping quoted keys. Leaves the
    /// position untouched and returns false if the bracket never closes.
    fn bracket(&mut self) -> bool {
        let saved = self.pos;
        self.advance();
        while let Some(c) = self.advance() {
            match c {
                ']' => return true,
                '"' | '\'' => loop {
                    match self.advance() {
                        None => {
                            self.pos = saved;
                            return false;
                        }
                        Some('\\') => {
                            self.advance();
                        }
                        Some(q) if q == c => break,
                        Some(_) => {}
                    }
                },
                _ => {}
            }
        }
        self.pos = saved;
        false
    }

    fn operator(&mut self) -> Result<TokenKind, ParseError> {
        let rest = &self.input[self.pos..];
        if let Some((text, op)) = OPERATORS.iter().find(|(text, _)| rest.starts_with(text)) {
            self.pos += text.len();
            return Ok(TokenKind::Binary(*op));
        }
        match self.advance() {
            Some('!') => Ok(TokenKind::Bang),
            Some(ch) => Err(ParseError::UnexpectedChar {
                ch,
                pos: self.pos - ch.len_utf8(),
            }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::tokenize(input)
            .unwrap_or_else(|e| panic!("tokenize({input:?}) failed: {e}"))
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn paths_and_callees() {
        assert_eq!(
            kinds("$record.email"),
            vec![TokenKind::Path("$record.email".into())]
        );
        assert_eq!(
            kinds("list[0]['a b'].c"),
            vec![TokenKind::Path("list[0]['a b'].c".into())]
        );
        assert_eq!(
            kinds("utils.fmt(x)"),
            vec![
                TokenKind::Callee("utils.fmt".into()),
                TokenKind::LParen,
                TokenKind::Path("x".into()),
                TokenKind::RParen,
            ]
        );
        assert_eq!(
            kinds("f (x)")[0],
            TokenKind::Path("f".into()),
        );
    }

    #[test]
    fn operators_prefer_longest_match() {
        assert_eq!(
            kinds("a !== b"),
            vec![
                TokenKind::Path("a".into()),
                TokenKind::Binary(BinaryOp::StrictNe),
                TokenKind::Path("b".into()),
            ]
        );
        assert_eq!(
            kinds("!!a"),
            vec![TokenKind::Bang, TokenKind::Bang, TokenKind::Path("a".into())]
        );
        assert_eq!(kinds("a>=b")[1], TokenKind::Binary(BinaryOp::Ge));
    }

    #[test]
    fn signs_bind_to_numbers_only_in_operand_position() {
        assert_eq!(
            kinds("1-2"),
            vec![
                TokenKind::Literal(Value::Number(1.0)),
                TokenKind::Binary(BinaryOp::Sub),
                TokenKind::Literal(Value::Number(2.0)),
            ]
        );
        assert_eq!(
            kinds("1 - -2"),
            vec![
                TokenKind::Literal(Value::Number(1.0)),
                TokenKind::Binary(BinaryOp::Sub),
                TokenKind::Literal(Value::Number(-2.0)),
            ]
        );
        assert_eq!(
            kinds("1 - - 2"),
            vec![
                TokenKind::Literal(Value::Number(1.0)),
                TokenKind::Binary(BinaryOp::Sub),
                TokenKind::Literal(Value::Number(-2.0)),
            ]
        );
        assert_eq!(kinds("+ 3"), vec![TokenKind::Literal(Value::Number(3.0))]);
        assert_eq!(
            kinds("(-.5)"),
            vec![
                TokenKind::LParen,
                TokenKind::Literal(Value::Number(-0.5)),
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn strings_keep_escaped_quotes() {
        assert_eq!(
            kinds(r#"'it\'s' + "a,(b""#),
            vec![
                TokenKind::Literal(Value::from("it's")),
                TokenKind::Binary(BinaryOp::Add),
                TokenKind::Literal(Value::from("a,(b")),
            ]
        );
    }

    #[test]
    fn errors_carry_positions() {
        assert_eq!(
            Lexer::tokenize("a = 1"),
            Err(ParseError::UnexpectedChar { ch: '=', pos: 2 })
        );
        assert_eq!(
            Lexer::tokenize("'open"),
            Err(ParseError::UnterminatedString(0))
        );
        assert!(matches!(
            Lexer::tokenize("1.2.3"),
            Err(ParseError::InvalidNumber { pos: 0, .. })
        ));
        assert!(matches!(
            Lexer::tokenize("12abc"),
            Err(ParseError::InvalidNumber { .. })
        ));
    }
}
