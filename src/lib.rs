//! A scientific calculator core.
//!
//! [`calculator::evaluate_expression`] turns a typed expression such as
//! `2^3 + sin(90)` into a number. [`session::Session`] adds the state a
//! calculator front end keeps around it: the last answer, a memory register
//! and a history of results.

pub mod calculator;
pub mod config;
pub mod error;
pub mod session;

pub use calculator::{AngleMode, CalcResult, evaluate_expression};
pub use config::Config;
pub use error::{CalcError, EvalError, ParseError, TokenizeError};
pub use session::Session;
