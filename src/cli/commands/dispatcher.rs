//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] with everything a command needs to run
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;
use std::sync::Arc;

use crate::catalog::{Catalog, Platform, ToolDescriptor, ToolFilter};
use crate::cli::args::{Cli, Commands, VerifyArgs};
use crate::config::ArsenalConfig;
use crate::error::Result;
use crate::shell::{CommandRunner, ShellRunner};
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Shared state handed to every command.
pub struct CommandContext {
    /// Resolved configuration.
    pub config: ArsenalConfig,
    /// Files the configuration was loaded from, in merge order.
    pub config_sources: Vec<PathBuf>,
    /// Built-in tools plus configured custom tools.
    pub catalog: Catalog,
    /// Filters from the global flags.
    pub filter: ToolFilter,
    /// Executes probe and install commands.
    pub runner: Arc<dyn CommandRunner>,
    /// Platform used for skip decisions and suggestions.
    pub platform: Platform,
}

impl CommandContext {
    /// Build a context from configuration, using the real shell.
    pub fn new(config: ArsenalConfig) -> Result<Self> {
        let catalog = Catalog::from_config(&config)?;
        Ok(Self {
            config,
            config_sources: Vec::new(),
            catalog,
            filter: ToolFilter::default(),
            runner: Arc::new(ShellRunner::new()),
            platform: Platform::current(),
        })
    }

    /// Record where the configuration came from.
    pub fn with_config_sources(mut self, sources: Vec<PathBuf>) -> Self {
        self.config_sources = sources;
        self
    }

    /// Replace the command runner.
    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Replace the tool filter.
    pub fn with_filter(mut self, filter: ToolFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Pretend to run on another platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Catalog entries that pass the filter.
    pub fn selected_tools(&self) -> Result<Vec<&ToolDescriptor>> {
        self.filter.apply(&self.catalog)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher around a prepared context.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    /// Get the command context.
    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    /// Dispatch and execute a command.
    ///
    /// `--config` short-circuits every subcommand; no subcommand means
    /// `verify` with default options.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if cli.config {
            return super::config::ConfigCommand::new(&self.context).execute(ui);
        }

        match &cli.command {
            Some(Commands::Verify(args)) => {
                super::verify::VerifyCommand::new(&self.context, args.clone()).execute(ui)
            }
            Some(Commands::Install(args)) => {
                super::install::InstallCommand::new(&self.context, args.clone()).execute(ui)
            }
            Some(Commands::List(args)) => {
                super::list::ListCommand::new(&self.context, args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => super::verify::VerifyCommand::new(&self.context, VerifyArgs::default())
                .execute(ui),
        }
    }
}
