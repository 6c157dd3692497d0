//! Install command implementation.
//!
//! The `arsenal install` command picks tools (from flags or interactive
//! prompts), confirms the selection and installs them one at a time with
//! retries.

use std::time::{Duration, Instant};

use crate::catalog::{essential_tools, ToolDescriptor};
use crate::cli::args::InstallArgs;
use crate::error::{ArsenalError, Result};
use crate::install::{
    check_prerequisites, needs_npm, InstallOutcome, InstallPhase, InstallSummary, Installer,
};
use crate::ui::{
    format_duration, Prompt, PromptOption, PromptType, SpinnerHandle, StatusKind, UserInterface,
};

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::runtime::{run_until_signal, RunOutcome};

/// The install command implementation.
pub struct InstallCommand<'a> {
    context: &'a CommandContext,
    args: InstallArgs,
}

impl<'a> InstallCommand<'a> {
    /// Create a new install command.
    pub fn new(context: &'a CommandContext, args: InstallArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &InstallArgs {
        &self.args
    }

    fn installer(&self) -> Installer {
        let installer =
            Installer::from_settings(self.context.runner.clone(), &self.context.config.settings);
        match self.args.max_retries {
            Some(max) => installer.with_max_retries(max),
            None => installer,
        }
    }

    /// Tools that pass the filters and can be installed automatically here.
    fn candidates(&self) -> Result<Vec<&'a ToolDescriptor>> {
        let platform = self.context.platform;
        Ok(self
            .context
            .selected_tools()?
            .into_iter()
            .filter(|t| t.install.is_some() && t.supports(platform))
            .collect())
    }

    /// Resolve the selection flags; `None` means no flag was given.
    fn selection_from_flags(&self) -> Result<Option<Vec<&'a ToolDescriptor>>> {
        if self.args.all {
            return self.candidates().map(Some);
        }

        if self.args.essential {
            let selected = self.context.selected_tools()?;
            return Ok(Some(
                essential_tools(&self.context.catalog, self.context.platform)
                    .into_iter()
                    .filter(|t| selected.contains(t))
                    .collect(),
            ));
        }

        if !self.args.tool.is_empty() {
            let mut tools = Vec::with_capacity(self.args.tool.len());
            for name in &self.args.tool {
                let tool = self
                    .context
                    .catalog
                    .get(name)
                    .ok_or_else(|| ArsenalError::UnknownTool { name: name.clone() })?;
                if !tools.contains(&tool) {
                    tools.push(tool);
                }
            }
            return Ok(Some(tools));
        }

        Ok(None)
    }

    /// Ask for categories, then for tools within them.
    fn select_interactively(&self, ui: &mut dyn UserInterface) -> Result<Vec<&'a ToolDescriptor>> {
        let candidates = self.candidates()?;

        let mut categories: Vec<&str> = Vec::new();
        for tool in &candidates {
            if !categories.contains(&tool.category.as_str()) {
                categories.push(&tool.category);
            }
        }

        let category_options = categories
            .iter()
            .map(|category| {
                let count = candidates.iter().filter(|t| t.category == *category).count();
                PromptOption {
                    label: format!("{} ({} tools)", category, count),
                    value: category.to_string(),
                }
            })
            .collect();
        let chosen = ui
            .prompt(&Prompt {
                key: "categories".to_string(),
                question: "Which categories do you want to install from?".to_string(),
                prompt_type: PromptType::MultiSelect {
                    options: category_options,
                },
                default: None,
            })?
            .as_strings();

        let in_chosen: Vec<_> = candidates
            .into_iter()
            .filter(|t| chosen.contains(&t.category))
            .collect();
        if in_chosen.is_empty() {
            return Ok(Vec::new());
        }

        let critical: Vec<&str> = in_chosen
            .iter()
            .filter(|t| t.critical)
            .map(|t| t.name.as_str())
            .collect();
        let tool_options = in_chosen.iter().map(|t| tool_option(t)).collect();
        let picked = ui
            .prompt(&Prompt {
                key: "tools".to_string(),
                question: "Which tools?".to_string(),
                prompt_type: PromptType::MultiSelect {
                    options: tool_options,
                },
                default: Some(critical.join(",")),
            })?
            .as_strings();

        Ok(in_chosen
            .into_iter()
            .filter(|t| picked.contains(&t.name))
            .collect())
    }

    fn confirm(&self, ui: &mut dyn UserInterface, tools: &[&ToolDescriptor]) -> Result<bool> {
        ui.show_header("Installation plan");
        for tool in tools {
            let size = tool
                .install
                .as_ref()
                .and_then(|spec| spec.size.clone())
                .map(|s| format!(" ({})", s))
                .unwrap_or_default();
            let critical = if tool.critical { " [critical]" } else { "" };
            ui.message(&format!("  • {}{}{}", tool.name, critical, size));
        }
        ui.message("");
        ui.message(&format!("Total tools: {}", tools.len()));
        let size_mb = estimated_size_mb(tools);
        if size_mb > 0.0 {
            ui.message(&format!("Estimated download size: ~{:.1}MB", size_mb));
        }

        if self.args.yes {
            return Ok(true);
        }

        let answer = ui.prompt(&Prompt {
            key: "confirm_install".to_string(),
            question: "Proceed with installation?".to_string(),
            prompt_type: PromptType::Confirm,
            default: Some("yes".to_string()),
        })?;
        Ok(answer.as_bool().unwrap_or(false))
    }

    /// Node.js and npm must be usable before npm recipes run. Returns the
    /// result to stop with when they are not.
    fn check_npm(&self, ui: &mut dyn UserInterface) -> Result<Option<CommandResult>> {
        let runner = self.context.runner.clone();
        let work = async move { check_prerequisites(runner.as_ref()).await };
        let checked = match run_until_signal(work)? {
            RunOutcome::Completed(checked) => checked,
            RunOutcome::Interrupted(signal) => {
                return Ok(Some(CommandResult::failure(signal.exit_code())))
            }
        };

        match checked {
            Ok(found) => {
                ui.show_status(StatusKind::Verified, "node", &found.node_version);
                ui.show_status(StatusKind::Verified, "npm", &found.npm_version);
                if !found.registry_reachable {
                    ui.warning("npm registry connection issues; some installations may fail");
                }
                Ok(None)
            }
            Err(err) => {
                tracing::debug!("Prerequisite check failed: {}", err);
                ui.error(&err.to_string());
                ui.hint(err.hint());
                Ok(Some(CommandResult::failure(1)))
            }
        }
    }

    fn show_outcomes(
        &self,
        ui: &mut dyn UserInterface,
        tools: &[&ToolDescriptor],
        outcomes: &[InstallOutcome],
        elapsed: Duration,
    ) {
        let summary = InstallSummary::from_outcomes(outcomes);

        ui.show_header("Installation summary");
        ui.message(&format!("  Tools selected:       {}", summary.selected));
        ui.message(&format!("  Installed:            {}", summary.installed));
        ui.message(&format!("  Already installed:    {}", summary.already_installed));
        ui.message(&format!("  Failed:               {}", summary.failed));
        ui.message(&format!("  Success rate:         {}%", summary.success_rate_percent));
        ui.message(&format!("  Duration:             {}", format_duration(elapsed)));

        let fresh: Vec<_> = tools
            .iter()
            .zip(outcomes)
            .filter(|(tool, outcome)| {
                outcome.success && !outcome.skipped && !quick_start(&tool.name).is_empty()
            })
            .collect();
        if !fresh.is_empty() {
            ui.show_header("Quick start");
            for (tool, _) in fresh {
                ui.show_section(&tool.name);
                for usage in quick_start(&tool.name) {
                    ui.show_command(usage);
                }
            }
        }

        let failed: Vec<_> = tools
            .iter()
            .zip(outcomes)
            .filter(|(_, outcome)| !outcome.success)
            .collect();
        if failed.is_empty() {
            ui.success("All selected tools are ready");
            return;
        }

        ui.message("");
        ui.error("Failed installations:");
        for (tool, outcome) in &failed {
            ui.message(&format!(
                "  • {} - {}",
                tool.name,
                outcome.error.as_deref().unwrap_or("unknown error")
            ));
        }
        ui.hint("You can try installing failed tools manually:");
        for (tool, _) in &failed {
            if let Some(spec) = &tool.install {
                ui.show_command(&spec.command);
            }
        }
    }
}

/// Usage examples shown after a tool is freshly installed.
fn quick_start(name: &str) -> &'static [&'static str] {
    match name {
        "ni" => &[
            "ni          # install dependencies with the detected package manager",
            "nr dev      # run the dev script",
            "nu          # update dependencies",
        ],
        "serve" => &[
            "serve .             # serve the current directory on http://localhost:3000",
            "serve dist -p 8080",
        ],
        "nodemon" => &["nodemon app.js", "nodemon --exec \"npm start\""],
        "prettier" => &["prettier --write .", "prettier --check ."],
        "fkill" => &[
            "fkill        # pick a process interactively",
            "fkill :3000  # kill whatever holds port 3000",
        ],
        "json-server" => &["json-server db.json"],
        _ => &[],
    }
}

fn tool_option(tool: &ToolDescriptor) -> PromptOption {
    let mut label = format!("{} - {}", tool.name, tool.description);
    if tool.critical {
        label.push_str(" [critical]");
    }
    if let Some(size) = tool.install.as_ref().and_then(|s| s.size.as_deref()) {
        label.push_str(&format!(" ({})", size));
    }
    PromptOption {
        label,
        value: tool.name.clone(),
    }
}

/// Sum of the known download sizes.
fn estimated_size_mb(tools: &[&ToolDescriptor]) -> f64 {
    tools
        .iter()
        .filter_map(|t| t.install.as_ref().and_then(|spec| spec.size_mb()))
        .sum()
}

/// Update or finish the tool's spinner for a phase change.
fn advance_spinner(spinner: &mut dyn SpinnerHandle, name: &str, phase: &InstallPhase) {
    match phase {
        InstallPhase::NotChecked => spinner.set_message(&format!("Checking {}...", name)),
        InstallPhase::Attempting { .. } | InstallPhase::Retrying { .. } => {
            spinner.set_message(&format!("{}: {}", name, phase))
        }
        InstallPhase::AlreadyInstalled => {
            spinner.finish_skipped(&format!("{} already installed", name))
        }
        InstallPhase::Verified { attempts } if *attempts > 1 => {
            spinner.finish_success(&format!("{} installed after {} attempts", name, attempts))
        }
        InstallPhase::Verified { .. } => spinner.finish_success(&format!("{} installed", name)),
        InstallPhase::ExhaustedRetries { .. } => {
            spinner.finish_error(&format!("{} {}", name, phase))
        }
    }
}

impl Command for InstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let tools = match self.selection_from_flags()? {
            Some(tools) => tools,
            None if ui.is_interactive() => self.select_interactively(ui)?,
            None => {
                ui.error("Nothing selected; pass --all, --essential or --tool NAME");
                return Ok(CommandResult::failure(1));
            }
        };

        if tools.is_empty() {
            ui.warning("No tools selected");
            return Ok(CommandResult::success());
        }

        if needs_npm(&tools) {
            if let Some(stopped) = self.check_npm(ui)? {
                return Ok(stopped);
            }
        }

        if !self.confirm(ui, &tools)? {
            ui.message("Installation cancelled");
            return Ok(CommandResult::success());
        }

        let installer = self.installer();
        let total = tools.len();
        let started = Instant::now();
        tracing::info!("Installing {} tools", total);

        let work = async {
            let mut current: Option<(usize, Box<dyn SpinnerHandle>)> = None;
            installer
                .install_all_observed(&tools, |index, tool, phase| {
                    if current.as_ref().is_none_or(|(i, _)| *i != index) {
                        let label = format!("[{}/{}] {}", index + 1, total, tool.name);
                        current = Some((index, ui.start_spinner(&label)));
                    }
                    if let Some((_, spinner)) = current.as_mut() {
                        advance_spinner(spinner.as_mut(), &tool.name, phase);
                    }
                })
                .await
        };

        let outcomes = match run_until_signal(work)? {
            RunOutcome::Completed(outcomes) => outcomes,
            RunOutcome::Interrupted(signal) => {
                ui.warning("Installation interrupted");
                return Ok(CommandResult::failure(signal.exit_code()));
            }
        };

        self.show_outcomes(ui, &tools, &outcomes, started.elapsed());

        if outcomes.iter().all(|o| o.success) {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
