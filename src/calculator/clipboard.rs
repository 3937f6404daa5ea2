//! Clipboard support for copying calculator results.
//!
//! On Linux the copying process owns the selection and serves it to other
//! applications, so the [`Clipboard`] must outlive the copy. An interactive
//! session keeps one open; a one-shot copy blocks until the selection is
//! taken over.

use super::CalcResult;
use crate::error::ClipboardError;
use arboard::Clipboard;

/// Anything that can receive copied text.
pub trait ClipboardSink {
    /// Place `text` on the clipboard.
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// When a copy returns relative to the clipboard handing over ownership.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hold {
    /// Return at once. The text stays available while the handle lives.
    WhileOpen,
    /// Return only after another application replaces the text.
    UntilReplaced,
}

/// A system clipboard handle kept open across copies.
pub struct SystemClipboard {
    clipboard: Clipboard,
    hold: Hold,
}

impl SystemClipboard {
    /// Open the system clipboard.
    pub fn open(hold: Hold) -> Result<Self, ClipboardError> {
        Ok(Self {
            clipboard: Clipboard::new()?,
            hold,
        })
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        match self.hold {
            Hold::WhileOpen => self.clipboard.set_text(text.to_string())?,
            Hold::UntilReplaced => set_and_wait(&mut self.clipboard, text)?,
        }
        Ok(())
    }
}

#[cfg(target_os = "linux")]
fn set_and_wait(clipboard: &mut Clipboard, text: &str) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;
    clipboard.set().wait().text(text.to_string())
}

// Other platforms keep the contents after the process exits.
#[cfg(not(target_os = "linux"))]
fn set_and_wait(clipboard: &mut Clipboard, text: &str) -> Result<(), arboard::Error> {
    clipboard.set_text(text.to_string())
}

/// Copy the raw value of a successful result.
///
/// Returns `Ok(false)` without touching the sink when the result is an
/// error.
pub fn copy_result(
    result: &CalcResult,
    sink: &mut impl ClipboardSink,
) -> Result<bool, ClipboardError> {
    match result.clipboard() {
        Some(text) => {
            sink.copy(text)?;
            tracing::debug!(text, "copied result to clipboard");
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CalcError, EvalError};

    #[derive(Default)]
    struct Recorder {
        copied: Vec<String>,
    }

    impl ClipboardSink for Recorder {
        fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.copied.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_copies_raw_value_of_success() {
        let mut recorder = Recorder::default();
        let result = CalcResult::from_outcome("1000*1000", Ok(1_000_000.0));
        assert!(copy_result(&result, &mut recorder).unwrap());
        assert_eq!(recorder.copied, vec!["1000000".to_string()]);
    }

    #[test]
    fn test_error_result_is_not_copied() {
        let mut recorder = Recorder::default();
        let result = CalcResult::from_outcome("2+", Err(CalcError::Eval(EvalError::MissingOperand)));
        assert!(!copy_result(&result, &mut recorder).unwrap());
        assert!(recorder.copied.is_empty());
    }
}
