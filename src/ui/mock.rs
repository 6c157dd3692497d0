//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use arsenal::ui::{MockUI, StatusKind, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("confirm_install", "yes");
//!
//! ui.show_status(StatusKind::Failed, "ni", "command failed or not found");
//! ui.success("Done!");
//!
//! assert!(ui.has_status(StatusKind::Failed, "ni"));
//! assert!(ui.has_success("Done!"));
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::error::Result;

use super::{OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, StatusKind, UserInterface};

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
    hints: Vec<String>,
    commands: Vec<String>,
    headers: Vec<String>,
    sections: Vec<String>,
    statuses: Vec<(StatusKind, String, String)>,
    spinners: Vec<String>,
    spinner_updates: Arc<Mutex<Vec<String>>>,
    spinner_finishes: Arc<Mutex<Vec<(SpinnerStatus, String)>>>,
    prompt_responses: HashMap<String, String>,
    prompt_queues: HashMap<String, VecDeque<String>>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Queue multiple responses for the same prompt key.
    ///
    /// Responses are returned in order. After the queue is exhausted,
    /// falls back to `set_prompt_response` or the prompt's default.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses.into_iter().map(|s| s.to_string()).collect();
        self.prompt_queues.insert(key.to_string(), queue);
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured copyable commands.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all captured section headings.
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Get all captured status lines as (kind, label, detail).
    pub fn statuses(&self) -> &[(StatusKind, String, String)] {
        &self.statuses
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get every `set_message` text across all spinners, in order.
    pub fn spinner_updates(&self) -> Vec<String> {
        self.spinner_updates
            .lock()
            .map(|u| u.clone())
            .unwrap_or_default()
    }

    /// Get every spinner's final status and message.
    pub fn spinner_finishes(&self) -> Vec<(SpinnerStatus, String)> {
        self.spinner_finishes
            .lock()
            .map(|f| f.clone())
            .unwrap_or_default()
    }

    /// Get all prompts that were shown (by key).
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific hint was shown.
    pub fn has_hint(&self, msg: &str) -> bool {
        self.hints.iter().any(|m| m.contains(msg))
    }

    /// Check if a status line with this kind and label was shown.
    pub fn has_status(&self, kind: StatusKind, label: &str) -> bool {
        self.statuses.iter().any(|(k, l, _)| *k == kind && l == label)
    }

    fn answer(prompt: &Prompt, response: &str) -> PromptResult {
        match prompt.prompt_type {
            PromptType::Confirm => PromptResult::Bool(matches!(
                response.to_lowercase().as_str(),
                "true" | "yes" | "y" | "1"
            )),
            PromptType::MultiSelect { .. } => {
                PromptResult::Strings(PromptResult::String(response.to_string()).as_strings())
            }
        }
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

    fn hint(&mut self, msg: &str) {
        self.hints.push(msg.to_string());
    }

    fn show_command(&mut self, command: &str) {
        self.commands.push(command.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_section(&mut self, title: &str) {
        self.sections.push(title.to_string());
    }

    fn show_status(&mut self, kind: StatusKind, label: &str, detail: &str) {
        self.statuses
            .push((kind, label.to_string(), detail.to_string()));
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        if let Some(response) = self
            .prompt_queues
            .get_mut(&prompt.key)
            .and_then(|queue| queue.pop_front())
        {
            return Ok(Self::answer(prompt, &response));
        }

        if let Some(response) = self.prompt_responses.get(&prompt.key) {
            return Ok(Self::answer(prompt, response));
        }

        if let Some(default) = &prompt.default {
            return Ok(Self::answer(prompt, default));
        }

        Ok(Self::answer(prompt, ""))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            messages: vec![message.to_string()],
            updates: Arc::clone(&self.spinner_updates),
            log: Arc::clone(&self.spinner_finishes),
        })
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    /// Finished successfully.
    Success,
    /// Finished with error.
    Error,
    /// Finished as skipped.
    Skipped,
    /// Cleared without a final line.
    Cleared,
}

/// Mock spinner that reports how it finished back to its [`MockUI`].
#[derive(Debug)]
pub struct MockSpinner {
    messages: Vec<String>,
    updates: Arc<Mutex<Vec<String>>>,
    log: Arc<Mutex<Vec<(SpinnerStatus, String)>>>,
}

impl MockSpinner {
    /// Get all messages set during spinning.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    fn finish(&mut self, status: SpinnerStatus, msg: &str) {
        if let Ok(mut log) = self.log.lock() {
            log.push((status, msg.to_string()));
        }
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
        if let Ok(mut updates) = self.updates.lock() {
            updates.push(msg.to_string());
        }
    }

    fn finish_success(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Success, msg);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Error, msg);
    }

    fn finish_skipped(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Skipped, msg);
    }

    fn clear(&mut self) {
        self.finish(SpinnerStatus::Cleared, "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::PromptOption;

    fn confirm(key: &str, default: Option<&str>) -> Prompt {
        Prompt {
            key: key.to_string(),
            question: "Continue?".to_string(),
            prompt_type: PromptType::Confirm,
            default: default.map(String::from),
        }
    }

    #[test]
    fn captures_output() {
        let mut ui = MockUI::new();
        ui.message("hello");
        ui.warning("careful");
        ui.error("broken");
        ui.hint("try again");
        ui.show_command("npm install -g serve");
        ui.show_section("Search Tools");

        assert!(ui.has_message("hello"));
        assert!(ui.has_warning("careful"));
        assert!(ui.has_error("broken"));
        assert!(ui.has_hint("again"));
        assert_eq!(ui.commands(), ["npm install -g serve"]);
        assert_eq!(ui.sections(), ["Search Tools"]);
    }

    #[test]
    fn configured_response_is_used() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("confirm_install", "yes");
        let result = ui.prompt(&confirm("confirm_install", Some("no"))).unwrap();
        assert_eq!(result, PromptResult::Bool(true));
        assert_eq!(ui.prompts_shown(), ["confirm_install"]);
    }

    #[test]
    fn queued_responses_come_first() {
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("again", vec!["no", "yes"]);
        ui.set_prompt_response("again", "no");

        let prompt = confirm("again", None);
        assert_eq!(ui.prompt(&prompt).unwrap(), PromptResult::Bool(false));
        assert_eq!(ui.prompt(&prompt).unwrap(), PromptResult::Bool(true));
        assert_eq!(ui.prompt(&prompt).unwrap(), PromptResult::Bool(false));
    }

    #[test]
    fn multiselect_response_is_split() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("categories", "npm,curl");
        let prompt = Prompt {
            key: "categories".to_string(),
            question: "Which?".to_string(),
            prompt_type: PromptType::MultiSelect {
                options: vec![PromptOption {
                    label: "npm".to_string(),
                    value: "npm".to_string(),
                }],
            },
            default: None,
        };
        assert_eq!(
            ui.prompt(&prompt).unwrap(),
            PromptResult::Strings(vec!["npm".into(), "curl".into()])
        );
    }

    #[test]
    fn unanswered_confirm_is_no() {
        let mut ui = MockUI::new();
        assert_eq!(
            ui.prompt(&confirm("x", None)).unwrap(),
            PromptResult::Bool(false)
        );
    }

    #[test]
    fn spinner_finishes_are_recorded() {
        let mut ui = MockUI::new();
        let mut spinner = ui.start_spinner("Installing jq");
        spinner.set_message("attempt 2");
        spinner.finish_error("jq failed");

        assert_eq!(ui.spinners(), ["Installing jq"]);
        assert_eq!(
            ui.spinner_finishes(),
            vec![(SpinnerStatus::Error, "jq failed".to_string())]
        );
    }
}
