//! Config command implementation.
//!
//! `arsenal --config` prints the resolved settings as YAML, preceded by the
//! files they were loaded from.

use crate::error::{ArsenalError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The config command implementation.
pub struct ConfigCommand<'a> {
    context: &'a CommandContext,
}

impl<'a> ConfigCommand<'a> {
    /// Create a new config command.
    pub fn new(context: &'a CommandContext) -> Self {
        Self { context }
    }
}

impl Command for ConfigCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.context.config_sources.is_empty() {
            ui.message("# built-in defaults");
        } else {
            for path in &self.context.config_sources {
                ui.message(&format!("# {}", path.display()));
            }
        }
        ui.message("");

        let yaml =
            serde_yaml::to_string(&self.context.config).map_err(|e| ArsenalError::Other(e.into()))?;
        ui.message(&yaml);

        Ok(CommandResult::success())
    }
}
