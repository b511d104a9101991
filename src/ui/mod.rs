//! Interactive user interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for headless runs
//! - [`MockUI`] for tests
//! - Prompts, spinners, and progress bars
//!
//! # Example
//!
//! ```
//! use ut_setup::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Until Then translation");
//! ui.success("Patch installed");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod progress;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockProgress, MockSpinner, MockUI};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use progress::{format_duration, ExtractProgress};
pub use prompts::prompt_user;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, SetupTheme};

use crate::error::Result;
use crate::patch::OutputLine;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a prompt and get user input.
    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult>;

    /// Start a spinner for an operation of unknown length.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Start a progress bar; the length is set once known.
    fn start_progress(&mut self, message: &str) -> Box<dyn ProgressHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show the wizard page title (e.g., "[2/4] Locate the game").
    fn show_page(&mut self, current: usize, total: usize, title: &str);

    /// Show a dim follow-up hint.
    fn show_hint(&mut self, hint: &str);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Append a line from a running tool to the spinner's log view.
    fn push_output(&mut self, line: &OutputLine);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}

/// Handle for controlling a progress bar.
pub trait ProgressHandle {
    /// Set the total number of units.
    fn set_length(&mut self, total: u64);

    /// Move to `pos` units done, describing the latest unit.
    fn set_position(&mut self, pos: u64, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}

/// A prompt to show to the user.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Unique key, also used for `UT_SETUP_PROMPT_<KEY>` overrides.
    pub key: String,
    /// The question to display.
    pub question: String,
    /// The type of prompt.
    pub prompt_type: PromptType,
    /// Default value if user just presses enter.
    pub default: Option<String>,
}

impl Prompt {
    /// Yes/no question.
    pub fn confirm(key: &str, question: &str, default: bool) -> Self {
        Self {
            key: key.to_string(),
            question: question.to_string(),
            prompt_type: PromptType::Confirm,
            default: Some(default.to_string()),
        }
    }
}

/// The type of prompt.
#[derive(Debug, Clone)]
pub enum PromptType {
    /// Yes/no confirmation.
    Confirm,
    /// Free-form text input.
    Input,
    /// Select one from a list of options.
    Select { options: Vec<PromptOption> },
}

/// An option in a select prompt.
#[derive(Debug, Clone)]
pub struct PromptOption {
    /// Display label.
    pub label: String,
    /// Value returned when selected.
    pub value: String,
}

impl PromptOption {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// Result of a prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptResult {
    /// Boolean result from confirm.
    Bool(bool),
    /// String result from input or select.
    String(String),
}

impl PromptResult {
    pub fn as_string(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::String(s) => s.clone(),
        }
    }

    /// Interpret as yes/no.
    ///
    /// String answers (env overrides, defaults) accept `true`/`yes`/`y`/`1`.
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::String(s) => matches!(
                s.trim().to_lowercase().as_str(),
                "true" | "yes" | "y" | "1"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_result_as_string() {
        assert_eq!(PromptResult::Bool(true).as_string(), "true");
        assert_eq!(PromptResult::String("auto".into()).as_string(), "auto");
    }

    #[test]
    fn prompt_result_as_bool_from_strings() {
        assert!(PromptResult::Bool(true).as_bool());
        assert!(PromptResult::String("yes".into()).as_bool());
        assert!(PromptResult::String(" TRUE ".into()).as_bool());
        assert!(PromptResult::String("1".into()).as_bool());
        assert!(!PromptResult::String("no".into()).as_bool());
        assert!(!PromptResult::String("".into()).as_bool());
    }

    #[test]
    fn confirm_prompt_stores_default() {
        let prompt = Prompt::confirm("retry", "Retry?", false);
        assert!(matches!(prompt.prompt_type, PromptType::Confirm));
        assert_eq!(prompt.default.as_deref(), Some("false"));
    }

    #[test]
    fn select_stores_options() {
        let prompt_type = PromptType::Select {
            options: vec![
                PromptOption::new("Search Steam", "auto"),
                PromptOption::new("Enter a path", "manual"),
            ],
        };
        if let PromptType::Select { options } = prompt_type {
            assert_eq!(options.len(), 2);
            assert_eq!(options[1].value, "manual");
        } else {
            panic!("Expected Select variant");
        }
    }
}
