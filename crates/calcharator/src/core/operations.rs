//! Arithmetic operators and built-in functions
//!
//! Undefined results are reported as NaN rather than as errors: the caller
//! decides how an undefined value is displayed.

use crate::core::engine::AngleMode;

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
    /// Modulo (%)
    Modulo,
    /// Power (^)
    Power,
}

impl Operation {
    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Power => "^",
        }
    }

    /// Maps an operator character to its operation
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '%' => Some(Self::Modulo),
            '^' => Some(Self::Power),
            _ => None,
        }
    }

    /// Applies the operation to two operands
    ///
    /// Division and modulo by zero yield NaN.
    #[must_use]
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => {
                if b == 0.0 {
                    f64::NAN
                } else {
                    a / b
                }
            }
            Self::Modulo => {
                if b == 0.0 {
                    f64::NAN
                } else {
                    a % b
                }
            }
            Self::Power => a.powf(b),
        }
    }
}

/// Single-argument built-in function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// Sine
    Sin,
    /// Cosine
    Cos,
    /// Tangent
    Tan,
    /// Inverse sine
    Asin,
    /// Inverse cosine
    Acos,
    /// Inverse tangent
    Atan,
    /// Square root
    Sqrt,
    /// Base-10 logarithm
    Log10,
    /// Natural logarithm
    Ln,
    /// Absolute value
    Abs,
}

impl Function {
    /// All supported functions
    pub const ALL: [Self; 10] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Sqrt,
        Self::Log10,
        Self::Ln,
        Self::Abs,
    ];

    /// Returns the name used in expressions
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sqrt => "sqrt",
            Self::Log10 => "log10",
            Self::Ln => "ln",
            Self::Abs => "abs",
        }
    }

    /// Looks up a function by name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Returns true for the trigonometric functions and their inverses
    #[must_use]
    pub const fn is_trigonometric(&self) -> bool {
        matches!(
            self,
            Self::Sin | Self::Cos | Self::Tan | Self::Asin | Self::Acos | Self::Atan
        )
    }

    /// Applies the function, interpreting angles in `mode`
    #[must_use]
    pub fn apply(self, x: f64, mode: AngleMode) -> f64 {
        if mode == AngleMode::Degrees {
            if let Some(exact) = self.exact_in_degrees(x) {
                return exact;
            }
        }
        match self {
            Self::Sin => mode.to_radians(x).sin(),
            Self::Cos => mode.to_radians(x).cos(),
            Self::Tan => tangent(x, mode),
            Self::Asin => mode.angle_from_radians(x.asin()),
            Self::Acos => mode.angle_from_radians(x.acos()),
            Self::Atan => mode.angle_from_radians(x.atan()),
            Self::Sqrt => x.sqrt(),
            Self::Log10 => logarithm(x, f64::log10),
            Self::Ln => logarithm(x, f64::ln),
            Self::Abs => x.abs(),
        }
    }

    /// Exact value at the degree angles whose result is 0, ±0.5 or ±1
    ///
    /// Converting through radians leaves residue there (`sin(180)` would be
    /// 1.2e-16), so those angles bypass the conversion.
    fn exact_in_degrees(self, x: f64) -> Option<f64> {
        match self {
            Self::Sin => exact_sine(x.rem_euclid(360.0)),
            Self::Cos => exact_sine((x.rem_euclid(360.0) + 90.0).rem_euclid(360.0)),
            Self::Tan => {
                let r = x.rem_euclid(180.0);
                if r == 0.0 {
                    Some(0.0)
                } else if r == 45.0 {
                    Some(1.0)
                } else if r == 135.0 {
                    Some(-1.0)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// Named constant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    /// Archimedes' constant
    Pi,
    /// Euler's number
    E,
}

impl Constant {
    /// Looks up a constant by name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Self::Pi),
            "e" => Some(Self::E),
            _ => None,
        }
    }

    /// Returns the constant's value
    #[must_use]
    pub const fn value(&self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }
}

fn tangent(x: f64, mode: AngleMode) -> f64 {
    // Odd multiples of a right angle have no tangent
    if mode == AngleMode::Degrees && (x % 180.0).abs() == 90.0 {
        return f64::NAN;
    }
    mode.to_radians(x).tan()
}

fn logarithm(x: f64, log: fn(f64) -> f64) -> f64 {
    if x <= 0.0 {
        f64::NAN
    } else {
        log(x)
    }
}

/// Sine of `r` degrees, `r` in `[0, 360)`, when it is 0, ±0.5 or ±1
fn exact_sine(r: f64) -> Option<f64> {
    if r.fract() != 0.0 {
        return None;
    }
    match r as u32 {
        0 | 180 => Some(0.0),
        30 | 150 => Some(0.5),
        90 => Some(1.0),
        210 | 330 => Some(-0.5),
        270 => Some(-1.0),
        _ => None,
    }
}
