//! Core calculator logic, independent of any terminal or UI
//!
//! - [`parser`] / [`evaluator`]: the expression engine
//! - [`controller`]: expression buffer, cursor and live preview
//! - [`cursor`]: the click-to-position caret model

pub mod controller;
pub mod cursor;
pub mod engine;
pub mod evaluator;
pub mod format;
mod operations;
pub mod parser;

pub use engine::{AngleMode, EngineConfig, Evaluation, ExpressionEngine};
pub use evaluator::Evaluator;
pub use operations::{Constant, Function, Operation};

use thiserror::Error;

/// Result type for expression parsing and checking
pub type CalcResult<T> = Result<T, CalcError>;

/// Reasons an expression is rejected
///
/// The `Display` text is what the user sees after `"Syntax Error: "`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Nothing to evaluate
    #[error("empty expression")]
    EmptyExpression,
    /// A character that cannot start any token
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    /// A malformed numeric literal
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    /// A name followed by `(` that is not a known function
    #[error("unknown function '{0}'")]
    UnknownFunction(String),
    /// A bare name that is not a known constant
    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),
    /// Any other grammar violation
    #[error("{0}")]
    Syntax(String),
}

impl CalcError {
    /// Creates a generic syntax error
    #[must_use]
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }
}
