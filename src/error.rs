//! Error types for the calculator.
//!
//! Each pipeline stage has its own error so callers can tell a typo from a
//! structural mistake. [`CalcError`] wraps all three for the string entry
//! point.

use crate::calculator::Function;
use thiserror::Error;

/// The input contains text that matches no token class.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unexpected character '{fragment}' at position {offset}")]
pub struct TokenizeError {
    /// The first unrecognized character.
    pub fragment: String,
    /// Byte offset into the normalized input.
    pub offset: usize,
}

/// The token stream is structurally malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("mismatched parentheses")]
    MismatchedParentheses,

    /// A name was used without a call, e.g. `x + 1`. There are no variables.
    #[error("unknown identifier: {0}")]
    UnknownIdentifier(String),

    #[error("unknown function: {0}")]
    UnknownFunction(String),
}

/// The postfix program could not be reduced to a single value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("missing operand")]
    MissingOperand,

    #[error("missing argument for {0}")]
    MissingArgument(Function),

    #[error("invalid expression")]
    InvalidExpression,
}

/// Any failure of [`evaluate_expression`](crate::calculator::evaluate_expression).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Failure to read or parse the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failure to talk to the system clipboard.
#[derive(Error, Debug)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(#[from] arboard::Error);
