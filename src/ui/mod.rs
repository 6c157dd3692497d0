//! Terminal user interface.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use arsenal::ui::{create_ui, OutputMode, StatusKind};
//!
//! // Non-interactive mode keeps the example testable
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Tool verification");
//! ui.show_status(StatusKind::Verified, "jq", "1.7.1");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod progress;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI, SpinnerStatus};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use progress::format_duration;
pub use prompts::prompt_user;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, ArsenalTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// Commands talk to the terminal only through this trait so they can be
/// driven by [`MockUI`] in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a plain message.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Display a secondary hint.
    fn hint(&mut self, msg: &str);

    /// Display a command the user can copy and run.
    fn show_command(&mut self, command: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show a section heading such as a category name.
    fn show_section(&mut self, title: &str);

    /// Show one tool's status line.
    fn show_status(&mut self, kind: StatusKind, label: &str, detail: &str);

    /// Show a prompt and get user input.
    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);

    /// Mark as skipped.
    fn finish_skipped(&mut self, msg: &str);

    /// Remove the spinner without leaving a line behind.
    fn clear(&mut self);
}

/// Status of a single line in tool listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// The tool answered its probe.
    Verified,
    /// The tool is missing or broken.
    Failed,
    /// The tool does not apply to this platform.
    Skipped,
    /// Informational entry, e.g. in `list` output.
    Info,
}

/// A prompt to show to the user.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Unique key for the prompt (used for lookup in tests and env overrides).
    pub key: String,
    /// The question to display.
    pub question: String,
    /// The type of prompt.
    pub prompt_type: PromptType,
    /// Default value if user just presses enter.
    pub default: Option<String>,
}

/// The type of prompt.
#[derive(Debug, Clone)]
pub enum PromptType {
    /// Yes/no confirmation.
    Confirm,
    /// Select multiple from a list of options.
    MultiSelect { options: Vec<PromptOption> },
}

/// An option in a select prompt.
#[derive(Debug, Clone)]
pub struct PromptOption {
    /// Display label.
    pub label: String,
    /// Value returned when selected.
    pub value: String,
}

/// Result of a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    /// Boolean result from confirm.
    Bool(bool),
    /// String result, e.g. an environment override.
    String(String),
    /// Multiple string results from multi-select.
    Strings(Vec<String>),
}

impl PromptResult {
    /// Interpret as a yes/no answer.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PromptResult::Bool(b) => Some(*b),
            PromptResult::String(s) => match s.trim().to_lowercase().as_str() {
                "y" | "yes" | "true" | "1" => Some(true),
                "n" | "no" | "false" | "0" => Some(false),
                _ => None,
            },
            PromptResult::Strings(_) => None,
        }
    }

    /// Interpret as a list of selected values.
    ///
    /// A single string is split on commas.
    pub fn as_strings(&self) -> Vec<String> {
        match self {
            PromptResult::Bool(_) => Vec::new(),
            PromptResult::String(s) => s
                .split(',')
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect(),
            PromptResult::Strings(v) => v.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_from_string() {
        assert_eq!(PromptResult::String("yes".into()).as_bool(), Some(true));
        assert_eq!(PromptResult::String("N".into()).as_bool(), Some(false));
        assert_eq!(PromptResult::String("maybe".into()).as_bool(), None);
        assert_eq!(PromptResult::Bool(true).as_bool(), Some(true));
    }

    #[test]
    fn strings_from_comma_list() {
        let result = PromptResult::String("jq, rg,,fd".into());
        assert_eq!(result.as_strings(), vec!["jq", "rg", "fd"]);
    }

    #[test]
    fn strings_passthrough() {
        let result = PromptResult::Strings(vec!["a".into()]);
        assert_eq!(result.as_strings(), vec!["a"]);
        assert!(PromptResult::Bool(true).as_strings().is_empty());
    }
}
