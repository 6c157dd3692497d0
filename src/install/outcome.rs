//! Install outcome and state types.

use crate::verify::percent;
use std::fmt;

/// Result of installing one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    /// The tool is usable afterwards.
    pub success: bool,
    /// It was already installed; nothing ran.
    pub skipped: bool,
    /// Last error when the install failed.
    pub error: Option<String>,
    /// Install attempts made.
    pub attempts: u32,
}

impl InstallOutcome {
    pub fn already_installed() -> Self {
        Self {
            success: true,
            skipped: true,
            error: None,
            attempts: 0,
        }
    }

    pub fn installed(attempts: u32) -> Self {
        Self {
            success: true,
            skipped: false,
            error: None,
            attempts,
        }
    }

    pub fn failed(error: impl Into<String>, attempts: u32) -> Self {
        Self {
            success: false,
            skipped: false,
            error: Some(error.into()),
            attempts,
        }
    }
}

/// Where an install currently stands.
///
/// ```text
/// NotChecked -> AlreadyInstalled
/// NotChecked -> Attempting(1) -> Verified
///                 |-> Retrying -> Attempting(2) -> ...
///                 |-> ExhaustedRetries
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallPhase {
    NotChecked,
    AlreadyInstalled,
    /// Running attempt `attempt` of `max`.
    Attempting { attempt: u32, max: u32 },
    /// An attempt failed and another will follow after the backoff.
    Retrying { attempt: u32, max: u32, error: String },
    Verified { attempts: u32 },
    ExhaustedRetries { attempts: u32, error: String },
}

impl InstallPhase {
    /// Whether no further transitions follow.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            InstallPhase::AlreadyInstalled
                | InstallPhase::Verified { .. }
                | InstallPhase::ExhaustedRetries { .. }
        )
    }
}

impl fmt::Display for InstallPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallPhase::NotChecked => write!(f, "checking"),
            InstallPhase::AlreadyInstalled => write!(f, "already installed"),
            InstallPhase::Attempting { attempt, max } => {
                write!(f, "installing (attempt {}/{})", attempt, max)
            }
            InstallPhase::Retrying { attempt, max, .. } => {
                write!(f, "failed, retrying ({}/{})", attempt, max)
            }
            InstallPhase::Verified { .. } => write!(f, "installed"),
            InstallPhase::ExhaustedRetries { error, .. } => write!(f, "failed: {}", error),
        }
    }
}

/// Totals for an install session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstallSummary {
    pub selected: usize,
    pub installed: usize,
    pub already_installed: usize,
    pub failed: usize,
    /// Share of selected tools usable afterwards, rounded. Zero when nothing
    /// was selected.
    pub success_rate_percent: u32,
}

impl InstallSummary {
    pub fn from_outcomes(outcomes: &[InstallOutcome]) -> Self {
        let selected = outcomes.len();
        let already_installed = outcomes.iter().filter(|o| o.success && o.skipped).count();
        let installed = outcomes.iter().filter(|o| o.success && !o.skipped).count();
        let failed = outcomes.iter().filter(|o| !o.success).count();

        Self {
            selected,
            installed,
            already_installed,
            failed,
            success_rate_percent: percent(installed + already_installed, selected),
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
