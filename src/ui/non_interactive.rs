//! Non-interactive UI for headless runs.

use std::collections::HashMap;

use crate::error::{Result, SetupError};
use crate::patch::OutputLine;

use super::theme::SetupTheme;
use super::{
    OutputMode, ProgressHandle, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface,
};

/// Prefix of environment variables that answer prompts.
pub const PROMPT_ENV_PREFIX: &str = "UT_SETUP_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `UT_SETUP_PROMPT_<KEY>` environment
/// variables, falling back to the prompt's default.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        let answer = self
            .env_overrides
            .get(&env_key)
            .or(prompt.default.as_ref())
            .cloned();

        match (answer, &prompt.prompt_type) {
            (Some(value), PromptType::Confirm) => {
                Ok(PromptResult::Bool(PromptResult::String(value).as_bool()))
            }
            (Some(value), _) => Ok(PromptResult::String(value)),
            (None, _) => Err(SetupError::ConfigValidationError {
                message: format!(
                    "Cannot prompt for '{}' in non-interactive mode (set {})",
                    prompt.key, env_key
                ),
            }),
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("  {}", message);
        }
        Box::new(LineSpinner { mode: self.mode })
    }

    fn start_progress(&mut self, message: &str) -> Box<dyn ProgressHandle> {
        if self.mode.shows_spinners() {
            println!("  {}", message);
        }
        Box::new(LineProgress {
            mode: self.mode,
            total: 0,
            last_reported: 0,
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn show_page(&mut self, current: usize, total: usize, title: &str) {
        if self.mode.shows_status() {
            println!("[{}/{}] {}", current, total, title);
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_status() {
            println!("  {}", hint);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that prints plain lines.
struct LineSpinner {
    mode: OutputMode,
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn push_output(&mut self, line: &OutputLine) {
        if self.mode.shows_command_output() {
            println!("    » {}", line.text());
        }
    }

    fn finish_success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("  {}", SetupTheme::plain().format_success(msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("  {}", SetupTheme::plain().format_error(msg));
    }
}

/// Progress reporter that prints at every quarter.
struct LineProgress {
    mode: OutputMode,
    total: u64,
    last_reported: u64,
}

impl ProgressHandle for LineProgress {
    fn set_length(&mut self, total: u64) {
        self.total = total;
    }

    fn set_position(&mut self, pos: u64, msg: &str) {
        if self.mode.shows_command_output() {
            println!("    {}", msg);
        }
        if self.total == 0 || !self.mode.shows_spinners() {
            return;
        }
        let quarter = pos * 4 / self.total;
        if quarter > self.last_reported {
            self.last_reported = quarter;
            println!("    {}/{}", pos, self.total);
        }
    }

    fn finish_success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("  {}", SetupTheme::plain().format_success(msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("  {}", SetupTheme::plain().format_error(msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(key: &str, default: Option<&str>) -> Prompt {
        Prompt {
            key: key.to_string(),
            question: "Path?".to_string(),
            prompt_type: PromptType::Input,
            default: default.map(String::from),
        }
    }

    #[test]
    fn non_interactive_is_not_interactive() {
        let ui = NonInteractiveUI::new(OutputMode::Normal);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn prompt_uses_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let result = ui.prompt(&input("pck_path", Some("/games"))).unwrap();
        assert_eq!(result.as_string(), "/games");
    }

    #[test]
    fn prompt_fails_without_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let err = ui.prompt(&input("pck_path", None)).unwrap_err();
        assert!(err.to_string().contains("UT_SETUP_PROMPT_PCK_PATH"));
    }

    #[test]
    fn prompt_uses_env_override() {
        let mut overrides = HashMap::new();
        overrides.insert("UT_SETUP_PROMPT_PCK_PATH".to_string(), "/override".to_string());

        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, overrides);
        let result = ui.prompt(&input("pck_path", Some("/games"))).unwrap();
        assert_eq!(result.as_string(), "/override");
    }

    #[test]
    fn confirm_answers_are_booleans() {
        let mut overrides = HashMap::new();
        overrides.insert("UT_SETUP_PROMPT_RETRY".to_string(), "yes".to_string());
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, overrides);

        let result = ui
            .prompt(&Prompt::confirm("retry", "Retry?", false))
            .unwrap();
        assert_eq!(result, PromptResult::Bool(true));

        let result = ui
            .prompt(&Prompt::confirm("backup", "Backup?", false))
            .unwrap();
        assert_eq!(result, PromptResult::Bool(false));
    }

    #[test]
    fn output_mode_preserved() {
        let ui = NonInteractiveUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn line_progress_reports_quarters() {
        let mut progress = LineProgress {
            mode: OutputMode::Normal,
            total: 8,
            last_reported: 0,
        };
        for pos in 1..=8 {
            progress.set_position(pos, "file");
        }
        assert_eq!(progress.last_reported, 4);
    }
}
