use crate::scope::Scope;

/// Limits applied when compiling an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalOptions {
    /// Maximum nesting of parentheses, `!`, `?:` and call arguments.
    pub max_depth: usize,
    /// Maximum expression length in bytes.
    pub max_length: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions {
            max_depth: 128,
            max_length: 64 * 1024,
        }
    }
}

impl EvalOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }
}

/// The execution context threaded through AST evaluation.
pub struct EvalCtx<'a> {
    /// Read-only scope that paths and callees resolve against.
    pub scope: &'a Scope,
}

impl<'a> EvalCtx<'a> {
    pub fn new(scope: &'a Scope) -> Self {
        EvalCtx { scope }
    }
}
