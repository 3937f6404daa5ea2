//! Postfix evaluation and result formatting.
//!
//! Runs the instruction stream produced by the parser against an explicit
//! operand stack, and wraps outcomes in [`CalcResult`] for display.

use super::functions::{AngleMode, factorial};
use super::parser::{Instruction, parse_to_postfix};
use super::tokenizer::tokenize;
use crate::error::{CalcError, EvalError};
use serde::Serialize;

/// Evaluate a postfix program.
///
/// Numeric edge cases are values, not errors: `1/0` is `inf`, `(-1)!` is
/// `NaN`.
pub fn evaluate(instructions: &[Instruction], mode: AngleMode) -> Result<f64, EvalError> {
    let mut stack: Vec<f64> = Vec::new();

    for instruction in instructions {
        match *instruction {
            Instruction::PushNumber(value) => stack.push(value),
            Instruction::ApplyOperator(op) => {
                let b = stack.pop().ok_or(EvalError::MissingOperand)?;
                let a = stack.pop().ok_or(EvalError::MissingOperand)?;
                stack.push(op.apply(a, b));
            }
            Instruction::ApplyFunction(function) => {
                let x = stack.pop().ok_or(EvalError::MissingArgument(function))?;
                stack.push(function.apply(x, mode));
            }
            Instruction::ApplyFactorial => {
                let n = stack.pop().ok_or(EvalError::MissingOperand)?;
                stack.push(factorial(n));
            }
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        _ => Err(EvalError::InvalidExpression),
    }
}

/// Evaluate a raw calculator expression.
///
/// The empty string evaluates to `0`.
pub fn evaluate_expression(input: &str, mode: AngleMode) -> Result<f64, CalcError> {
    if input.is_empty() {
        return Ok(0.0);
    }

    let tokens = tokenize(input)?;
    let program = parse_to_postfix(&tokens)?;
    Ok(evaluate(&program, mode)?)
}

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalcResult {
    /// Successful calculation. The value may be infinite or NaN.
    Success {
        /// The original expression.
        expression: String,
        /// The numeric value.
        value: f64,
        /// Formatted for display (with thousand separators).
        display_result: String,
        /// Formatted for clipboard (raw number).
        clipboard_result: String,
    },
    /// The expression could not be evaluated.
    Error {
        /// The original expression.
        expression: String,
        /// Error message to display.
        message: String,
    },
}

impl CalcResult {
    /// Build a result from an expression and the outcome of evaluating it.
    pub fn from_outcome(expression: impl Into<String>, outcome: Result<f64, CalcError>) -> Self {
        let expression = expression.into();
        match outcome {
            Ok(value) => Self::Success {
                expression,
                display_result: format_display(value),
                clipboard_result: format_clipboard(value),
                value,
            },
            Err(err) => Self::Error {
                expression,
                message: err.to_string(),
            },
        }
    }

    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The numeric value, for successful results.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Success { value, .. } => Some(*value),
            Self::Error { .. } => None,
        }
    }

    /// Get the display string (result or error message).
    pub fn display(&self) -> &str {
        match self {
            Self::Success { display_result, .. } => display_result,
            Self::Error { message, .. } => message,
        }
    }

    /// Get the clipboard string (only for successful results).
    pub fn clipboard(&self) -> Option<&str> {
        match self {
            Self::Success {
                clipboard_result, ..
            } => Some(clipboard_result),
            Self::Error { .. } => None,
        }
    }
}

/// Spell out values that have no digits.
fn format_special(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("Infinity")
    } else if value == f64::NEG_INFINITY {
        Some("-Infinity")
    } else {
        None
    }
}

/// Format a number for display with thousand separators.
pub(crate) fn format_display(value: f64) -> String {
    if let Some(special) = format_special(value) {
        return special.to_string();
    }

    let raw = format_clipboard(value);
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, dec_part) = match unsigned.find('.') {
        Some(dot_pos) => unsigned.split_at(dot_pos),
        None => (unsigned, ""),
    };

    format!("{}{}{}", sign, group_thousands(int_part), dec_part)
}

/// Insert `,` every three digits of an unsigned integer string.
fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a number for clipboard (raw number, no separators).
fn format_clipboard(value: f64) -> String {
    if let Some(special) = format_special(value) {
        return special.to_string();
    }

    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.10}", value);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "-0" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }
}
