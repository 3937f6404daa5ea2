//! Tokenizer for calculator expressions.
//!
//! Normalizes keypad glyphs, expands the `pi` constant textually, then scans
//! the input into [`Token`]s with a single anchored regex.

use crate::error::TokenizeError;
use lazy_static::lazy_static;
use regex::Regex;
use std::f64::consts::PI;

lazy_static! {
    /// One token at the start of the remaining input. Alternatives are tried
    /// in order: number, identifier, single-character symbol.
    static ref TOKEN: Regex = Regex::new(
        r"^(?:(?P<number>[0-9]*\.?[0-9]+(?:e[+-]?[0-9]+)?)|(?P<ident>[A-Za-z_][A-Za-z0-9_]*)|(?P<symbol>[\^*/+%(),!\-]))"
    ).unwrap();
}

/// Glyphs the keypad displays, mapped to the ASCII the tokenizer reads.
const GLYPHS: &[(char, char)] = &[
    ('×', '*'),
    ('÷', '/'),
    ('\u{2212}', '-'), // minus sign
    ('\u{2013}', '-'), // en dash
    ('\u{2012}', '-'), // figure dash
    ('\u{FE63}', '-'), // small hyphen-minus
    ('\u{FF0D}', '-'), // fullwidth hyphen-minus
];

/// A binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl Operator {
    /// The operator written as `c`, if any.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            '%' => Some(Self::Rem),
            '^' => Some(Self::Pow),
            _ => None,
        }
    }

    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 2,
            Self::Mul | Self::Div | Self::Rem => 3,
            Self::Pow => 4,
        }
    }

    /// Only `^` groups right to left.
    pub fn is_right_associative(self) -> bool {
        matches!(self, Self::Pow)
    }

    /// IEEE-754 arithmetic. Division by zero and invalid powers produce
    /// infinities and NaN rather than errors; `%` keeps the sign of `a`.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
            Self::Rem => a % b,
            Self::Pow => a.powf(b),
        }
    }
}

/// A lexical token, in input order.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Identifier(String),
    Operator(Operator),
    LeftParen,
    RightParen,
    Comma,
    Factorial,
}

/// Replace display glyphs with ASCII and substitute every `pi` with the
/// decimal value of π.
///
/// The substitution is purely textual, so `2pi` reads as `23.14159…` and an
/// identifier can never contain `pi`.
pub fn normalize(input: &str) -> String {
    let ascii: String = input
        .chars()
        .map(|c| {
            GLYPHS
                .iter()
                .find(|(glyph, _)| *glyph == c)
                .map_or(c, |(_, ascii)| *ascii)
        })
        .collect();

    ascii.replace("pi", &PI.to_string())
}

/// Split an expression into tokens.
pub fn tokenize(input: &str) -> Result<Vec<Token>, TokenizeError> {
    let normalized = normalize(input);
    let mut tokens = Vec::new();
    let mut offset = 0;

    while offset < normalized.len() {
        let rest = &normalized[offset..];
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            break;
        }
        offset += rest.len() - trimmed.len();

        let Some(caps) = TOKEN.captures(trimmed) else {
            let fragment = trimmed.chars().next().map(String::from).unwrap_or_default();
            return Err(TokenizeError { fragment, offset });
        };

        let token = if let Some(m) = caps.name("number") {
            let value = m.as_str().parse::<f64>().map_err(|_| TokenizeError {
                fragment: m.as_str().to_string(),
                offset,
            })?;
            Token::Number(value)
        } else if let Some(m) = caps.name("ident") {
            Token::Identifier(m.as_str().to_string())
        } else {
            match trimmed.as_bytes()[0] {
                b'(' => Token::LeftParen,
                b')' => Token::RightParen,
                b',' => Token::Comma,
                b'!' => Token::Factorial,
                byte => match Operator::from_symbol(byte as char) {
                    Some(op) => Token::Operator(op),
                    None => {
                        return Err(TokenizeError {
                            fragment: (byte as char).to_string(),
                            offset,
                        });
                    }
                },
            }
        };

        tokens.push(token);
        offset += caps[0].len();
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_and_operators() {
        let tokens = tokenize("12 + 3.5*2").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(12.0),
                Token::Operator(Operator::Add),
                Token::Number(3.5),
                Token::Operator(Operator::Mul),
                Token::Number(2.0),
            ]
        );
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(tokenize(".5").unwrap(), vec![Token::Number(0.5)]);
        assert_eq!(tokenize("1e3").unwrap(), vec![Token::Number(1000.0)]);
        assert_eq!(tokenize("2.5e-1").unwrap(), vec![Token::Number(0.25)]);
        // An exponent needs digits; otherwise `e` is an identifier.
        assert_eq!(
            tokenize("2e").unwrap(),
            vec![Token::Number(2.0), Token::Identifier("e".to_string())]
        );
    }

    #[test]
    fn test_functions_and_punctuation() {
        let tokens = tokenize("sqrt(4, 5)!").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("sqrt".to_string()),
                Token::LeftParen,
                Token::Number(4.0),
                Token::Comma,
                Token::Number(5.0),
                Token::RightParen,
                Token::Factorial,
            ]
        );
    }

    #[test]
    fn test_glyphs_are_normalized() {
        assert_eq!(normalize("6×7÷2−1"), "6*7/2-1");
        let tokens = tokenize("3 × 4").unwrap();
        assert_eq!(tokens[1], Token::Operator(Operator::Mul));
    }

    #[test]
    fn test_pi_is_substituted_textually() {
        assert_eq!(tokenize("pi").unwrap(), vec![Token::Number(PI)]);
        assert_eq!(normalize("2pi"), "23.141592653589793");
        // "spin" becomes "s3.141592653589793n"
        assert_eq!(
            tokenize("spin").unwrap(),
            vec![
                Token::Identifier("s3".to_string()),
                Token::Number(0.141592653589793),
                Token::Identifier("n".to_string()),
            ]
        );
    }

    #[test]
    fn test_whitespace_only_yields_no_tokens() {
        assert!(tokenize("   ").unwrap().is_empty());
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_stray_symbol_is_rejected() {
        let err = tokenize("2 $ 3").unwrap_err();
        assert_eq!(err.fragment, "$");
        assert_eq!(err.offset, 2);

        let err = tokenize("5.").unwrap_err();
        assert_eq!(err.fragment, ".");
        assert_eq!(err.offset, 1);
    }

    #[test]
    fn test_operator_table() {
        let ops: Vec<Operator> = "+-*/%^".chars().filter_map(Operator::from_symbol).collect();
        assert_eq!(ops.len(), 6);
        assert_eq!(Operator::from_symbol('!'), None);
        assert_eq!(Operator::from_symbol('('), None);

        let right: Vec<Operator> = ops.into_iter().filter(|op| op.is_right_associative()).collect();
        assert_eq!(right, vec![Operator::Pow]);
    }
}
