//! Expression engine seam
//!
//! The calculator controller only ever talks to an [`ExpressionEngine`]:
//! "given a text string, return a number, an undefined result, or a syntax
//! error". Angle mode is fixed when the engine is built and never changes
//! afterwards.

use serde::{Deserialize, Serialize};

use crate::core::CalcResult;

/// Unit used by the trigonometric functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    /// Angles in degrees
    #[default]
    Degrees,
    /// Angles in radians
    Radians,
}

impl AngleMode {
    /// Converts an angle expressed in this mode to radians
    #[must_use]
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            // Reduce first so large multiples of 360 stay exact
            Self::Degrees => (angle % 360.0).to_radians(),
            Self::Radians => angle,
        }
    }

    /// Converts an angle in radians to this mode
    #[must_use]
    pub fn angle_from_radians(self, radians: f64) -> f64 {
        match self {
            Self::Degrees => radians.to_degrees(),
            Self::Radians => radians,
        }
    }

    /// Short label for status lines
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Degrees => "DEG",
            Self::Radians => "RAD",
        }
    }
}

/// Immutable evaluator configuration, built once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Unit for trigonometric functions
    pub angle_mode: AngleMode,
    /// Round results to 15 significant digits (so `0.1+0.2` is `0.3`)
    pub canonical_rounding: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            angle_mode: AngleMode::Degrees,
            canonical_rounding: true,
        }
    }
}

impl EngineConfig {
    /// Creates the default configuration (degrees, canonical rounding)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the angle mode
    #[must_use]
    pub const fn with_angle_mode(mut self, angle_mode: AngleMode) -> Self {
        self.angle_mode = angle_mode;
        self
    }

    /// Enables or disables canonical rounding
    #[must_use]
    pub const fn with_canonical_rounding(mut self, enabled: bool) -> Self {
        self.canonical_rounding = enabled;
        self
    }
}

/// Outcome of evaluating a piece of text
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// Syntactically valid with a finite numeric result
    Value(f64),
    /// Syntactically valid, but the result is undefined (NaN or infinite)
    Undefined,
    /// The text is not a valid expression; carries the evaluator's message
    SyntaxError(String),
}

impl Evaluation {
    /// Classifies a raw numeric result
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        if value.is_finite() {
            Self::Value(value)
        } else {
            Self::Undefined
        }
    }

    /// Returns the value if there is one
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            _ => None,
        }
    }
}

/// Capability to check and evaluate expression text
pub trait ExpressionEngine {
    /// Validates the syntax of `text`
    ///
    /// # Errors
    ///
    /// Returns the syntax error describing why `text` is not an expression.
    fn check_syntax(&self, text: &str) -> CalcResult<()>;

    /// Evaluates `text`, returning NaN when the result is undefined or the
    /// text does not parse
    fn calculate(&self, text: &str) -> f64;

    /// Checks and evaluates `text` in one step
    fn evaluate(&self, text: &str) -> Evaluation {
        match self.check_syntax(text) {
            Ok(()) => Evaluation::from_value(self.calculate(text)),
            Err(e) => Evaluation::SyntaxError(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CalcError;

    struct Fixed(Option<f64>);

    impl ExpressionEngine for Fixed {
        fn check_syntax(&self, _text: &str) -> CalcResult<()> {
            match self.0 {
                Some(_) => Ok(()),
                None => Err(CalcError::Syntax("nope".into())),
            }
        }

        fn calculate(&self, _text: &str) -> f64 {
            self.0.unwrap_or(f64::NAN)
        }
    }

    #[test]
    fn test_default_config_is_degrees() {
        let config = EngineConfig::default();
        assert_eq!(config.angle_mode, AngleMode::Degrees);
        assert!(config.canonical_rounding);
    }

    #[test]
    fn test_config_builders() {
        let config = EngineConfig::new()
            .with_angle_mode(AngleMode::Radians)
            .with_canonical_rounding(false);
        assert_eq!(config.angle_mode, AngleMode::Radians);
        assert!(!config.canonical_rounding);
    }

    #[test]
    fn test_angle_conversion() {
        assert_eq!(AngleMode::Radians.to_radians(1.5), 1.5);
        let pi = std::f64::consts::PI;
        assert!((AngleMode::Degrees.to_radians(180.0) - pi).abs() < 1e-12);
        assert!((AngleMode::Degrees.to_radians(540.0) - pi).abs() < 1e-12);
        assert!((AngleMode::Degrees.angle_from_radians(pi) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_mode_labels() {
        assert_eq!(AngleMode::Degrees.label(), "DEG");
        assert_eq!(AngleMode::Radians.label(), "RAD");
    }

    #[test]
    fn test_angle_mode_serde() {
        let json = serde_json::to_string(&AngleMode::Radians).unwrap();
        assert_eq!(json, "\"radians\"");
        let back: AngleMode = serde_json::from_str("\"degrees\"").unwrap();
        assert_eq!(back, AngleMode::Degrees);
    }

    #[test]
    fn test_evaluation_from_value() {
        assert_eq!(Evaluation::from_value(4.0), Evaluation::Value(4.0));
        assert_eq!(Evaluation::from_value(f64::NAN), Evaluation::Undefined);
        assert_eq!(Evaluation::from_value(f64::INFINITY), Evaluation::Undefined);
        assert_eq!(Evaluation::Value(2.0).value(), Some(2.0));
        assert_eq!(Evaluation::Undefined.value(), None);
    }

    #[test]
    fn test_default_evaluate_combines_check_and_calculate() {
        assert_eq!(Fixed(Some(7.0)).evaluate("x"), Evaluation::Value(7.0));
        assert_eq!(
            Fixed(None).evaluate("x"),
            Evaluation::SyntaxError("nope".into())
        );
        assert_eq!(Fixed(Some(f64::NAN)).evaluate("x"), Evaluation::Undefined);
    }
}
