//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Arsenal - verify and install developer command-line tools.
#[derive(Debug, Parser)]
#[command(name = "arsenal")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Print version
    #[arg(short = 'V', long, short_alias = 'v', action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Print the resolved configuration and exit
    #[arg(long, global = true)]
    pub config: bool,

    /// Load only this config file instead of the discovered ones
    #[arg(long, value_name = "PATH", global = true)]
    pub config_file: Option<PathBuf>,

    /// Only consider critical tools
    #[arg(long, global = true)]
    pub critical_only: bool,

    /// Only consider tools whose category contains NAME (case-insensitive)
    #[arg(long, value_name = "NAME", global = true)]
    pub category: Option<String>,

    /// Show probe commands and raw error output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Show failures and the summary only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check which tools are installed (default if no command specified)
    Verify(VerifyArgs),

    /// Install missing tools
    Install(InstallArgs),

    /// List the tool catalog
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `verify` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct VerifyArgs {
    /// Where to write the JSON report (overrides settings.report_path)
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Do not write a report file
    #[arg(long, conflicts_with = "report")]
    pub no_report: bool,

    /// Per-probe timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Number of probes to run at once
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Print the report as JSON on stdout instead of the human output
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Install every tool that passes the filters
    #[arg(long, conflicts_with_all = ["essential", "tool"])]
    pub all: bool,

    /// Install the critical tools for this platform
    #[arg(long, conflicts_with = "tool")]
    pub essential: bool,

    /// Install a specific tool (repeatable)
    #[arg(long = "tool", value_name = "NAME")]
    pub tool: Vec<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Attempts per tool (overrides settings.max_retries)
    #[arg(long, value_name = "N")]
    pub max_retries: Option<u32>,
}

impl InstallArgs {
    /// Whether any selection flag was given.
    pub fn has_selection(&self) -> bool {
        self.all || self.essential || !self.tool.is_empty()
    }
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// List category names only
    #[arg(long)]
    pub categories: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
