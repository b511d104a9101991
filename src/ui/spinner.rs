//! Progress spinners with a live log view.

use indicatif::{ProgressBar, ProgressStyle};
use std::collections::VecDeque;
use std::time::Duration;

use crate::patch::OutputLine;

use super::theme::SetupTheme;
use super::SpinnerHandle;

/// Number of tool output lines kept under the spinner.
const LOG_VIEW_LINES: usize = 3;

/// Width at which log view lines are cut.
const LOG_VIEW_WIDTH: usize = 72;

/// A spinner for long-running operations.
///
/// Lines pushed with [`SpinnerHandle::push_output`] are shown below the
/// spinner message, keeping the last few. In verbose mode every line is
/// also printed above the spinner.
pub struct ProgressSpinner {
    bar: ProgressBar,
    base_message: String,
    log: VecDeque<String>,
    print_all: bool,
    theme: SetupTheme,
}

impl ProgressSpinner {
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.cyan} {msg}")
        {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self {
            bar,
            base_message: message.to_string(),
            log: VecDeque::new(),
            print_all: false,
            theme: SetupTheme::detect(),
        }
    }

    /// Create a spinner that doesn't show (for silent mode).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            base_message: String::new(),
            log: VecDeque::new(),
            print_all: false,
            theme: SetupTheme::plain(),
        }
    }

    /// Also print every pushed line above the spinner.
    pub fn print_all_output(mut self, enabled: bool) -> Self {
        self.print_all = enabled;
        self
    }

    fn render(&self) {
        let mut msg = self.base_message.clone();
        for line in &self.log {
            msg.push('\n');
            msg.push_str("  ");
            msg.push_str(&self.theme.format_output_line(line));
        }
        self.bar.set_message(msg);
    }

    fn finish_with(&mut self, line: String) {
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
            self.bar.set_style(style);
        }
        self.bar.finish_with_message(line);
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() > LOG_VIEW_WIDTH {
        let cut: String = text.chars().take(LOG_VIEW_WIDTH - 3).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn set_message(&mut self, msg: &str) {
        self.base_message = msg.to_string();
        self.render();
    }

    fn push_output(&mut self, line: &OutputLine) {
        let text = line.text().trim_end();
        if text.is_empty() {
            return;
        }
        if self.print_all {
            self.bar.println(self.theme.format_output_line(text));
        }

        self.log.push_back(truncate(text));
        while self.log.len() > LOG_VIEW_LINES {
            self.log.pop_front();
        }
        self.render();
    }

    fn finish_success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.finish_with(line);
    }

    fn finish_error(&mut self, msg: &str) {
        let line = self.theme.format_error(msg);
        self.finish_with(line);
    }
}
