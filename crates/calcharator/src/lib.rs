//! calcharator - terminal calculator and scratchpad
//!
//! The calculator screen edits a single expression line with a
//! click-to-position caret and shows a live preview of the result. A home
//! menu and a read-only scratch text screen complete the app.
//!
//! All logic lives in [`core`] and is usable without a terminal; [`tui`]
//! draws it with ratatui.
//!
//! # Example
//!
//! ```rust
//! use calcharator::prelude::*;
//!
//! let mut calc = CalculatorController::default();
//! for label in ["1", "2", "+", "3"] {
//!     calc.press(label);
//! }
//! assert_eq!(calc.preview(), "15");
//!
//! calc.evaluate();
//! assert_eq!(calc.buffer(), "15");
//!
//! // Trigonometry is in degrees unless configured otherwise
//! let eval = Evaluator::new();
//! assert_eq!(eval.evaluate("sin(30)"), Evaluation::Value(0.5));
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;

#[cfg(feature = "tui")]
pub mod tui;

use crate::core::controller::{BufferState, CalculatorController};
use crate::core::{EngineConfig, Evaluator};

/// Evaluates `expression` the way the `=` key would
///
/// Returns the resulting buffer text (a value, `"Math Error"` or a
/// `"Syntax Error: "` message) and its state.
#[must_use]
pub fn evaluate_line(engine: EngineConfig, expression: &str) -> (String, BufferState) {
    let mut controller = CalculatorController::new(Evaluator::with_config(engine));
    controller.load(expression);
    controller.evaluate();
    (controller.buffer().to_string(), controller.state())
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{AppConfig, StartScreen, Verbosity};
    pub use crate::core::controller::{compute_preview, BufferState, CalculatorController};
    pub use crate::core::cursor::{CursorTarget, SplitText};
    pub use crate::core::format::format_result;
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{
        AngleMode, CalcError, CalcResult, EngineConfig, Evaluation, Evaluator, ExpressionEngine,
        Function, Operation,
    };
    pub use crate::error::{AppError, AppResult};
    pub use crate::evaluate_line;

    #[cfg(feature = "tui")]
    pub use crate::tui::{App, Route, Router};
}
