//! Calculator module for evaluating mathematical expressions.
//!
//! This module provides functionality to:
//! - Split an expression into tokens
//! - Convert tokens into a postfix program (shunting-yard)
//! - Evaluate that program in degrees or radians
//! - Copy results to the clipboard

mod clipboard;
mod evaluation;
mod functions;
mod parser;
mod tokenizer;

pub use clipboard::{ClipboardSink, Hold, SystemClipboard, copy_result};
pub use evaluation::{CalcResult, evaluate, evaluate_expression};
pub(crate) use evaluation::format_display;
pub use functions::{AngleMode, Function, ParseAngleModeError, factorial};
pub use parser::{Instruction, parse_to_postfix};
pub use tokenizer::{Operator, Token, normalize, tokenize};
