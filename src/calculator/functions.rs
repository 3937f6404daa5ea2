//! Built-in functions and angle handling.
//!
//! The function table is a fixed enum. Names are case-sensitive and the
//! binary `^` entry lives on [`Operator::Pow`](super::Operator::Pow) since it
//! is only reachable through infix syntax.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How trigonometric arguments and results are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AngleMode {
    #[default]
    #[serde(rename = "deg", alias = "DEG", alias = "degrees")]
    Degrees,
    #[serde(rename = "rad", alias = "RAD", alias = "radians")]
    Radians,
}

impl AngleMode {
    /// The other mode.
    pub fn toggle(self) -> Self {
        match self {
            Self::Degrees => Self::Radians,
            Self::Radians => Self::Degrees,
        }
    }

    /// Convert a user-facing angle into radians for the native trig call.
    fn to_native(self, x: f64) -> f64 {
        match self {
            Self::Degrees => x * PI / 180.0,
            Self::Radians => x,
        }
    }

    /// Convert a radian result of an inverse trig call back to user units.
    fn to_user(self, x: f64) -> f64 {
        match self {
            Self::Degrees => x * 180.0 / PI,
            Self::Radians => x,
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degrees => f.write_str("DEG"),
            Self::Radians => f.write_str("RAD"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown angle mode '{0}' (expected DEG or RAD)")]
pub struct ParseAngleModeError(String);

impl FromStr for AngleMode {
    type Err = ParseAngleModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("deg") || s.eq_ignore_ascii_case("degrees") {
            Ok(Self::Degrees)
        } else if s.eq_ignore_ascii_case("rad") || s.eq_ignore_ascii_case("radians") {
            Ok(Self::Radians)
        } else {
            Err(ParseAngleModeError(s.to_string()))
        }
    }
}

/// A unary built-in function callable as `name(x)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Ln,
    Log,
    Sqrt,
    Exp,
    Abs,
    Fact,
}

impl Function {
    /// Every entry of the table, in the order the keypad lists them.
    pub const ALL: [Function; 12] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Ln,
        Function::Log,
        Function::Sqrt,
        Function::Exp,
        Function::Abs,
        Function::Fact,
    ];

    /// Look a function up by its exact, case-sensitive name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Sqrt => "sqrt",
            Self::Exp => "exp",
            Self::Abs => "abs",
            Self::Fact => "fact",
        }
    }

    /// Apply the function. Only the trig entries look at `mode`, and only at
    /// the boundary of the native call.
    pub fn apply(self, x: f64, mode: AngleMode) -> f64 {
        match self {
            Self::Sin => mode.to_native(x).sin(),
            Self::Cos => mode.to_native(x).cos(),
            Self::Tan => mode.to_native(x).tan(),
            Self::Asin => mode.to_user(x.asin()),
            Self::Acos => mode.to_user(x.acos()),
            Self::Atan => mode.to_user(x.atan()),
            Self::Ln => x.ln(),
            Self::Log => x.log10(),
            Self::Sqrt => x.sqrt(),
            Self::Exp => x.exp(),
            Self::Abs => x.abs(),
            Self::Fact => factorial(x),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Factorial with the calculator's loose contract.
///
/// Negative input gives `NaN`, fractional input is floored, and large input
/// overflows to `+inf`.
pub fn factorial(n: f64) -> f64 {
    if n < 0.0 {
        return f64::NAN;
    }
    if n == 0.0 {
        return 1.0;
    }

    let limit = n.floor();
    let mut result = 1.0;
    let mut i = 1.0;
    while i <= limit {
        result *= i;
        if result.is_infinite() {
            break;
        }
        i += 1.0;
    }
    result
}
