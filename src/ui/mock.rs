//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use ut_setup::ui::{MockUI, Prompt, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("backup", "false");
//!
//! let answer = ui.prompt(&Prompt::confirm("backup", "Keep a backup?", true)).unwrap();
//! assert!(!answer.as_bool());
//! assert_eq!(ui.prompts_shown(), &["backup"]);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::error::{Result, SetupError};
use crate::patch::OutputLine;

use super::{
    OutputMode, ProgressHandle, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface,
};

/// Records shared between the UI and the handles it hands out.
#[derive(Debug, Default)]
struct Recorded {
    output_lines: Vec<String>,
    progress: Vec<(u64, u64)>,
    finished: Vec<(bool, String)>,
}

/// Mock UI implementation for testing.
///
/// Supports both single responses (via `set_prompt_response`) and queued
/// responses (via `queue_prompt_responses`) for keys asked more than once.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    pages: Vec<(usize, usize, String)>,
    hints: Vec<String>,
    spinners: Vec<String>,
    progress_bars: Vec<String>,
    prompt_responses: HashMap<String, String>,
    prompt_queues: HashMap<String, VecDeque<String>>,
    prompts_shown: Vec<String>,
    recorded: Rc<RefCell<Recorded>>,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Queue responses for the same prompt key, returned in order.
    ///
    /// After the queue is exhausted, falls back to `set_prompt_response`
    /// or the prompt default.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses.into_iter().map(|s| s.to_string()).collect();
        self.prompt_queues.insert(key.to_string(), queue);
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Page titles shown, as (current, total, title).
    pub fn pages(&self) -> &[(usize, usize, String)] {
        &self.pages
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// Messages of spinners that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Messages of progress bars that were started.
    pub fn progress_bars(&self) -> &[String] {
        &self.progress_bars
    }

    /// Prompts that were shown, by key.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Tool output lines pushed to any spinner.
    pub fn output_lines(&self) -> Vec<String> {
        self.recorded.borrow().output_lines.clone()
    }

    /// Progress updates as (position, length).
    pub fn progress_updates(&self) -> Vec<(u64, u64)> {
        self.recorded.borrow().progress.clone()
    }

    /// Finish messages of spinners and progress bars, with success flag.
    pub fn finished(&self) -> Vec<(bool, String)> {
        self.recorded.borrow().finished.clone()
    }

    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    pub fn has_hint(&self, msg: &str) -> bool {
        self.hints.iter().any(|m| m.contains(msg))
    }

    fn next_response(&mut self, key: &str) -> Option<String> {
        if let Some(queue) = self.prompt_queues.get_mut(key) {
            if let Some(response) = queue.pop_front() {
                return Some(response);
            }
        }
        self.prompt_responses.get(key).cloned()
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        let answer = self
            .next_response(&prompt.key)
            .or_else(|| prompt.default.clone())
            .ok_or_else(|| SetupError::ConfigValidationError {
                message: format!("No mock response for prompt '{}'", prompt.key),
            })?;

        Ok(match prompt.prompt_type {
            PromptType::Confirm => PromptResult::Bool(PromptResult::String(answer).as_bool()),
            _ => PromptResult::String(answer),
        })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            recorded: Rc::clone(&self.recorded),
            messages: vec![message.to_string()],
        })
    }

    fn start_progress(&mut self, message: &str) -> Box<dyn ProgressHandle> {
        self.progress_bars.push(message.to_string());
        Box::new(MockProgress {
            recorded: Rc::clone(&self.recorded),
            total: 0,
        })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_page(&mut self, current: usize, total: usize, title: &str) {
        self.pages.push((current, total, title.to_string()));
    }

    fn show_hint(&mut self, hint: &str) {
        self.hints.push(hint.to_string());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Mock spinner that records pushed output and finish messages.
#[derive(Debug)]
pub struct MockSpinner {
    recorded: Rc<RefCell<Recorded>>,
    messages: Vec<String>,
}

impl MockSpinner {
    /// Messages set during spinning, starting with the initial one.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn push_output(&mut self, line: &OutputLine) {
        self.recorded
            .borrow_mut()
            .output_lines
            .push(line.text().to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.recorded
            .borrow_mut()
            .finished
            .push((true, msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.recorded
            .borrow_mut()
            .finished
            .push((false, msg.to_string()));
    }
}

/// Mock progress bar that records positions.
#[derive(Debug)]
pub struct MockProgress {
    recorded: Rc<RefCell<Recorded>>,
    total: u64,
}

impl ProgressHandle for MockProgress {
    fn set_length(&mut self, total: u64) {
        self.total = total;
    }

    fn set_position(&mut self, pos: u64, _msg: &str) {
        self.recorded.borrow_mut().progress.push((pos, self.total));
    }

    fn finish_success(&mut self, msg: &str) {
        self.recorded
            .borrow_mut()
            .finished
            .push((true, msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.recorded
            .borrow_mut()
            .finished
            .push((false, msg.to_string()));
    }
}
