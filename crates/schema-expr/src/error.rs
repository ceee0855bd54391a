use thiserror::Error;

/// Reasons an expression string cannot be compiled.
///
/// `evaluate` swallows these into `Value::Undefined`; `Expression::parse`
/// surfaces them for design-time validation of authored schemas.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected character '{ch}' at {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("Unterminated string starting at {0}")]
    UnterminatedString(usize),

    #[error("Invalid number '{text}' at {pos}")]
    InvalidNumber { text: String, pos: usize },

    #[error("Unexpected token '{found}' at {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    #[error("Expression nests deeper than {0} levels")]
    TooDeep(usize),

    #[error("Expression is {len} bytes long, limit is {max}")]
    TooLong { len: usize, max: usize },
}
