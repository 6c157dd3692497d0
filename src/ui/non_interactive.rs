//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::{ArsenalError, Result};

use super::theme::ArsenalTheme;
use super::{OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, StatusKind, UserInterface};

/// Prefix of environment variables that answer prompts, e.g.
/// `ARSENAL_PROMPT_CONFIRM_INSTALL=yes`.
pub const PROMPT_ENV_PREFIX: &str = "ARSENAL_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Output is plain text. Spinner messages are suppressed in CI, where they
/// would only add noise to the log.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
    is_ci: bool,
    theme: ArsenalTheme,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
            is_ci: crate::shell::is_ci(),
            theme: ArsenalTheme::plain(),
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
            is_ci: false,
            theme: ArsenalTheme::plain(),
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
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", self.theme.format_warning(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn hint(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("  {}", msg);
        }
    }

    fn show_command(&mut self, command: &str) {
        if self.mode.shows_status() {
            println!("  {}", command);
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn show_section(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}", self.theme.format_category(title));
        }
    }

    fn show_status(&mut self, kind: StatusKind, label: &str, detail: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_status(kind, label, detail));
        }
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let is_multiselect = matches!(prompt.prompt_type, PromptType::MultiSelect { .. });

        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        let answer = self
            .env_overrides
            .get(&env_key)
            .or(prompt.default.as_ref())
            .ok_or_else(|| ArsenalError::ConfigValidationError {
                message: format!(
                    "Cannot prompt for '{}' in non-interactive mode (no default value)",
                    prompt.key
                ),
            })?;

        if is_multiselect {
            Ok(PromptResult::Strings(PromptResult::String(answer.clone()).as_strings()))
        } else {
            Ok(PromptResult::String(answer.clone()))
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        let show = self.mode.shows_spinners() && !self.is_ci;
        if show {
            println!("  {}", message);
        }
        Box::new(LineSpinner {
            show: self.mode.shows_status(),
            theme: self.theme.clone(),
        })
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner stand-in that prints only the final line.
struct LineSpinner {
    show: bool,
    theme: ArsenalTheme,
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.show {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        if self.show {
            println!("{}", self.theme.format_error(msg));
        }
    }

    fn finish_skipped(&mut self, msg: &str) {
        if self.show {
            println!("{}", self.theme.format_skipped(msg));
        }
    }

    fn clear(&mut self) {}
}
