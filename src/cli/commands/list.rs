//! List command implementation.
//!
//! `arsenal list` shows the catalog grouped by category without running
//! anything.

use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::ui::{StatusKind, UserInterface};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The list command implementation.
pub struct ListCommand<'a> {
    context: &'a CommandContext,
    args: ListArgs,
}

impl<'a> ListCommand<'a> {
    /// Create a new list command.
    pub fn new(context: &'a CommandContext, args: ListArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

impl Command for ListCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let tools = self.context.selected_tools()?;
        let platform = self.context.platform;

        let mut categories: Vec<&str> = Vec::new();
        for tool in &tools {
            if !categories.contains(&tool.category.as_str()) {
                categories.push(&tool.category);
            }
        }

        if self.args.categories {
            for category in categories {
                ui.message(category);
            }
            return Ok(CommandResult::success());
        }

        for category in categories {
            ui.show_section(category);
            for tool in tools.iter().filter(|t| t.category == category) {
                let mut detail = tool.description.clone();
                if tool.critical {
                    detail.push_str(" (critical)");
                }
                let kind = if tool.supports(platform) {
                    StatusKind::Info
                } else {
                    detail.push_str(&format!(" (not supported on {})", platform));
                    StatusKind::Skipped
                };
                ui.show_status(kind, &tool.name, &detail);
            }
        }

        ui.message("");
        ui.message(&format!("{} tools", tools.len()));
        Ok(CommandResult::success())
    }
}
