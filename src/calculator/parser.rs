//! Shunting-yard conversion from tokens to a postfix program.
//!
//! Functions are held on the operator stack and released right after the
//! parenthesis group that closes their call. Unary minus is rewritten as
//! `0 x -`, so the evaluator only ever sees binary operators.

use super::functions::Function;
use super::tokenizer::{Operator, Token};
use crate::error::ParseError;

/// One step of a postfix program.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Instruction {
    PushNumber(f64),
    ApplyOperator(Operator),
    ApplyFunction(Function),
    ApplyFactorial,
}

/// Entries waiting on the operator stack.
#[derive(Clone, Copy, Debug)]
enum Pending {
    Operator(Operator),
    /// A prefix minus. Its `0` is already in the output; it is emitted as a
    /// plain subtraction. Kept apart from `Operator(Sub)` so `!` can flush it.
    Negate,
    Function(Function),
    LeftParen,
}

impl Pending {
    /// Precedence for operator entries, `None` for parens and functions.
    fn precedence(self) -> Option<u8> {
        match self {
            Self::Operator(op) => Some(op.precedence()),
            Self::Negate => Some(Operator::Sub.precedence()),
            Self::Function(_) | Self::LeftParen => None,
        }
    }

    /// The instruction this entry becomes, `None` for a paren marker.
    fn into_instruction(self) -> Option<Instruction> {
        match self {
            Self::Operator(op) => Some(Instruction::ApplyOperator(op)),
            Self::Negate => Some(Instruction::ApplyOperator(Operator::Sub)),
            Self::Function(f) => Some(Instruction::ApplyFunction(f)),
            Self::LeftParen => None,
        }
    }
}

/// Whether a `-` at this position negates rather than subtracts.
fn is_prefix_position(previous: Option<&Token>) -> bool {
    matches!(
        previous,
        None | Some(Token::LeftParen) | Some(Token::Operator(_)) | Some(Token::Comma)
    )
}

/// Convert infix tokens into a postfix instruction sequence.
pub fn parse_to_postfix(tokens: &[Token]) -> Result<Vec<Instruction>, ParseError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Pending> = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Number(value) => output.push(Instruction::PushNumber(*value)),

            // Flushes pending operators of the current argument. Calls never
            // take more than one argument.
            Token::Comma => {
                while let Some(&top) = stack.last() {
                    if matches!(top, Pending::LeftParen) {
                        break;
                    }
                    stack.pop();
                    output.extend(top.into_instruction());
                }
            }

            Token::Identifier(name) => {
                if tokens.get(i + 1) != Some(&Token::LeftParen) {
                    return Err(ParseError::UnknownIdentifier(name.clone()));
                }
                let function = Function::from_name(name)
                    .ok_or_else(|| ParseError::UnknownFunction(name.clone()))?;
                stack.push(Pending::Function(function));
            }

            Token::Factorial => {
                // `-3!` is `(-3)!`: a negation directly below binds first.
                while let Some(Pending::Negate) = stack.last() {
                    stack.pop();
                    output.push(Instruction::ApplyOperator(Operator::Sub));
                }
                output.push(Instruction::ApplyFactorial);
            }

            Token::LeftParen => stack.push(Pending::LeftParen),

            Token::RightParen => {
                loop {
                    match stack.pop() {
                        Some(Pending::LeftParen) => break,
                        Some(entry) => output.extend(entry.into_instruction()),
                        None => return Err(ParseError::MismatchedParentheses),
                    }
                }
                if let Some(&Pending::Function(function)) = stack.last() {
                    stack.pop();
                    output.push(Instruction::ApplyFunction(function));
                }
            }

            Token::Operator(op) => {
                let previous = i.checked_sub(1).map(|p| &tokens[p]);
                let negates = *op == Operator::Sub && is_prefix_position(previous);
                if negates {
                    output.push(Instruction::PushNumber(0.0));
                }

                // A negation pops like any binary minus: `2*-3` is `2 0 * 3 -`.
                while let Some(&top) = stack.last() {
                    let Some(top_precedence) = top.precedence() else {
                        break;
                    };
                    let pops = if op.is_right_associative() {
                        top_precedence > op.precedence()
                    } else {
                        top_precedence >= op.precedence()
                    };
                    if !pops {
                        break;
                    }
                    stack.pop();
                    output.extend(top.into_instruction());
                }
                stack.push(if negates {
                    Pending::Negate
                } else {
                    Pending::Operator(*op)
                });
            }
        }
    }

    while let Some(entry) = stack.pop() {
        match entry.into_instruction() {
            Some(instruction) => output.push(instruction),
            None => return Err(ParseError::MismatchedParentheses),
        }
    }

    Ok(output)
}
