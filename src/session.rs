//! Calculator session state.
//!
//! The evaluator is stateless; a [`Session`] holds what a calculator keeps
//! between evaluations: the angle mode, the last answer, a memory register
//! and a bounded, newest-first history.

use crate::calculator::{AngleMode, CalcResult, evaluate_expression, format_display};
use crate::config::Config;
use crate::error::CalcError;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::VecDeque;

lazy_static! {
    /// The `ans` keyword as a whole word.
    static ref ANS: Regex = Regex::new(r"\bans\b").unwrap();
}

/// A successfully evaluated expression.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub expression: String,
    pub value: f64,
}

impl HistoryEntry {
    /// The value formatted like a displayed result.
    pub fn display_value(&self) -> String {
        format_display(self.value)
    }
}

/// Angle mode, last answer, memory and history around the evaluator.
#[derive(Clone, Debug)]
pub struct Session {
    angle_mode: AngleMode,
    last_answer: f64,
    memory: f64,
    history: VecDeque<HistoryEntry>,
    history_limit: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Session {
    /// A fresh session with zeroed answer and memory.
    pub fn new(angle_mode: AngleMode, history_limit: usize) -> Self {
        Self {
            angle_mode,
            last_answer: 0.0,
            memory: 0.0,
            history: VecDeque::new(),
            history_limit,
        }
    }

    /// A fresh session using the configured mode and history limit.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.angle_mode, config.history_limit)
    }

    /// The mode trigonometric functions use.
    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        tracing::debug!(%mode, "angle mode set");
        self.angle_mode = mode;
    }

    /// Flip between degrees and radians, returning the new mode.
    pub fn toggle_angle_mode(&mut self) -> AngleMode {
        self.set_angle_mode(self.angle_mode.toggle());
        self.angle_mode
    }

    /// The value of the last successful evaluation, `0` initially.
    pub fn last_answer(&self) -> f64 {
        self.last_answer
    }

    /// Replace each `ans` word with the last answer in parentheses.
    pub fn expand_answer(&self, input: &str) -> String {
        let replacement = format!("({})", self.last_answer);
        ANS.replace_all(input, regex::NoExpand(&replacement))
            .into_owned()
    }

    /// Evaluate `input` in the session's angle mode.
    ///
    /// Success updates the last answer and history. Failure leaves the
    /// session untouched.
    pub fn evaluate(&mut self, input: &str) -> CalcResult {
        let outcome = evaluate_expression(&self.expand_answer(input), self.angle_mode);
        match &outcome {
            Ok(value) => {
                tracing::debug!(expression = input, value, "evaluated");
                self.last_answer = *value;
                self.record(input, *value);
            }
            Err(err) => tracing::debug!(expression = input, %err, "evaluation failed"),
        }
        CalcResult::from_outcome(input, outcome)
    }

    fn record(&mut self, expression: &str, value: f64) {
        self.history.push_front(HistoryEntry {
            expression: expression.to_string(),
            value,
        });
        self.history.truncate(self.history_limit);
    }

    /// History entries, newest first.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    /// Forget every history entry.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// The memory register.
    pub fn memory_recall(&self) -> f64 {
        self.memory
    }

    /// Reset the memory register to `0`.
    pub fn memory_clear(&mut self) {
        self.memory = 0.0;
    }

    /// `M+`: add `input` (or the last answer when blank) to memory.
    pub fn memory_add(&mut self, input: &str) -> Result<f64, CalcError> {
        let value = self.memory_operand(input)?;
        self.memory += value;
        Ok(self.memory)
    }

    /// `M-`: subtract `input` (or the last answer when blank) from memory.
    pub fn memory_subtract(&mut self, input: &str) -> Result<f64, CalcError> {
        let value = self.memory_operand(input)?;
        self.memory -= value;
        Ok(self.memory)
    }

    fn memory_operand(&self, input: &str) -> Result<f64, CalcError> {
        if input.trim().is_empty() {
            return Ok(self.last_answer);
        }
        evaluate_expression(&self.expand_answer(input), self.angle_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EvalError, ParseError};

    #[test]
    fn test_success_updates_answer_and_history() {
        let mut session = Session::default();
        let result = session.evaluate("2+3");
        assert_eq!(result.value(), Some(5.0));
        assert_eq!(session.last_answer(), 5.0);

        session.evaluate("ans*2");
        assert_eq!(session.last_answer(), 10.0);

        let history: Vec<_> = session.history().collect();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].expression, "ans*2");
        assert_eq!(history[0].value, 10.0);
        assert_eq!(history[1].expression, "2+3");
    }

    #[test]
    fn test_failure_leaves_state_untouched() {
        let mut session = Session::default();
        session.evaluate("7");
        let result = session.evaluate("(1");
        assert!(!result.is_success());
        assert_eq!(result.display(), "mismatched parentheses");
        assert_eq!(session.last_answer(), 7.0);
        assert_eq!(session.history().count(), 1);
    }

    #[test]
    fn test_negative_answer_is_parenthesized() {
        let mut session = Session::default();
        session.evaluate("-4");
        assert_eq!(session.expand_answer("2-ans"), "2-(-4)");
        assert_eq!(session.evaluate("ans^2").value(), Some(16.0));
        // Only the whole word is replaced.
        assert_eq!(session.expand_answer("answer"), "answer");
        // There is no implicit multiplication.
        assert_eq!(
            session.evaluate("2 ans").display(),
            EvalError::InvalidExpression.to_string()
        );
    }

    #[test]
    fn test_history_is_bounded() {
        let mut session = Session::new(AngleMode::Degrees, 2);
        session.evaluate("1");
        session.evaluate("2");
        session.evaluate("3");
        let values: Vec<f64> = session.history().map(|entry| entry.value).collect();
        assert_eq!(values, vec![3.0, 2.0]);

        session.clear_history();
        assert_eq!(session.history().count(), 0);
    }

    #[test]
    fn test_history_values_display_like_results() {
        let mut session = Session::default();
        session.evaluate("1/0");
        session.evaluate("1000*1000");
        let shown: Vec<String> = session.history().map(HistoryEntry::display_value).collect();
        assert_eq!(shown, vec!["1,000,000".to_string(), "Infinity".to_string()]);
    }

    #[test]
    fn test_angle_mode_threads_through() {
        let mut session = Session::new(AngleMode::Radians, 10);
        let rad = session.evaluate("cos(0)").value().unwrap();
        assert_eq!(rad, 1.0);

        assert_eq!(session.toggle_angle_mode(), AngleMode::Degrees);
        let deg = session.evaluate("asin(1)").value().unwrap();
        assert!((deg - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_memory_register() {
        let mut session = Session::default();
        assert_eq!(session.memory_add("2*3"), Ok(6.0));
        assert_eq!(session.memory_subtract("1"), Ok(5.0));
        assert_eq!(session.memory_recall(), 5.0);

        session.evaluate("10");
        assert_eq!(session.memory_add(""), Ok(15.0));

        assert_eq!(
            session.memory_add("y"),
            Err(CalcError::Parse(ParseError::UnknownIdentifier("y".to_string())))
        );
        assert_eq!(session.memory_recall(), 15.0);

        session.memory_clear();
        assert_eq!(session.memory_recall(), 0.0);
    }
}
