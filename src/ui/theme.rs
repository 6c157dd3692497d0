//! Visual theme and styling.

use console::{Style, Term};

/// Arsenal's visual theme.
#[derive(Debug, Clone)]
pub struct ArsenalTheme {
    /// Style for verified tools and success messages (green).
    pub success: Style,
    /// Style for warnings and skipped tools (orange).
    pub warning: Style,
    /// Style for failures (red bold).
    pub error: Style,
    /// Style for category headings (cyan bold).
    pub category: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted text (bold).
    pub highlight: Style,
    /// Style for headers (magenta bold).
    pub header: Style,
    /// Style for copyable commands.
    pub command: Style,
    /// Style for hints (magenta dim).
    pub hint: Style,
}

impl Default for ArsenalTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ArsenalTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            category: Style::new().cyan().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().magenta(),
            command: Style::new().yellow(),
            hint: Style::new().magenta().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            category: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            command: Style::new(),
            hint: Style::new(),
        }
    }

    /// Colored theme if the terminal supports it, plain otherwise.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a skipped message (icon + text in orange).
    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("○ {}", msg)))
    }

    /// Format a header.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }

    /// Format a category heading with its emoji marker.
    pub fn format_category(&self, name: &str) -> String {
        format!("{}", self.category.apply_to(format!("📦 {}", name)))
    }

    /// Format a status line: icon, padded label, dim detail.
    pub fn format_status(&self, kind: super::StatusKind, label: &str, detail: &str) -> String {
        use super::StatusKind;

        let padded = format!("{:<20}", label);
        let head = match kind {
            StatusKind::Verified => self.format_success(&padded),
            StatusKind::Failed => self.format_error(&padded),
            StatusKind::Skipped => self.format_skipped(&padded),
            StatusKind::Info => format!("• {}", padded),
        };
        if detail.is_empty() {
            format!("  {}", head.trim_end())
        } else {
            format!("  {} {}", head, self.dim.apply_to(detail))
        }
    }
}

/// Check whether colors should be used.
///
/// Honors `NO_COLOR` and disables colors when stdout is not a terminal.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    Term::stdout().is_term()
}
