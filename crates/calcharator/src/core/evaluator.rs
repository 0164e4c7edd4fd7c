//! AST evaluator implementing [`ExpressionEngine`]

use crate::core::parser::{AstNode, Parser};
use crate::core::{CalcResult, EngineConfig, ExpressionEngine};

/// Evaluator for parsed expressions
///
/// Holds only the immutable [`EngineConfig`]; evaluation never mutates it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    config: EngineConfig,
}

impl Evaluator {
    /// Creates an evaluator with the default configuration (degrees)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an evaluator with an explicit configuration
    #[must_use]
    pub const fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this evaluator was built with
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluates an AST node; undefined sub-results propagate as NaN
    #[must_use]
    pub fn evaluate_ast(&self, node: &AstNode) -> f64 {
        match node {
            AstNode::Number(n) => *n,
            AstNode::Negate(inner) => -self.evaluate_ast(inner),
            AstNode::BinaryOp { left, op, right } => {
                op.apply(self.evaluate_ast(left), self.evaluate_ast(right))
            }
            AstNode::Call { function, arg } => {
                function.apply(self.evaluate_ast(arg), self.config.angle_mode)
            }
        }
    }

    /// Parses and evaluates `input`
    ///
    /// # Errors
    ///
    /// Returns the parse error if `input` is not a valid expression.
    pub fn evaluate_str(&self, input: &str) -> CalcResult<f64> {
        let ast = Parser::parse_str(input)?;
        let value = self.evaluate_ast(&ast);
        Ok(if self.config.canonical_rounding {
            canonical_round(value)
        } else {
            value
        })
    }
}

impl ExpressionEngine for Evaluator {
    fn check_syntax(&self, text: &str) -> CalcResult<()> {
        Parser::parse_str(text).map(|_| ())
    }

    fn calculate(&self, text: &str) -> f64 {
        self.evaluate_str(text).unwrap_or(f64::NAN)
    }
}

/// Rounds to 15 significant digits, hiding binary representation noise
fn canonical_round(value: f64) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    format!("{value:.14e}").parse().unwrap_or(value)
}
