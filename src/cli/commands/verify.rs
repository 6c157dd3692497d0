//! Verify command implementation.
//!
//! The `arsenal verify` command probes every selected tool, renders the
//! results, writes the JSON report and prints installation suggestions.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::cli::args::VerifyArgs;
use crate::error::Result;
use crate::report::{InstallSuggestions, SystemInfo, VerificationReport};
use crate::ui::UserInterface;
use crate::verify::{
    has_blocking_failure, run_batch_with_progress, summarize, BatchOptions, ProbeResult, Prober,
};

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::display::{show_results, show_suggestions, show_summary};
use super::runtime::{run_until_signal, RunOutcome};

/// The verify command implementation.
pub struct VerifyCommand<'a> {
    context: &'a CommandContext,
    args: VerifyArgs,
}

impl<'a> VerifyCommand<'a> {
    /// Create a new verify command.
    pub fn new(context: &'a CommandContext, args: VerifyArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &VerifyArgs {
        &self.args
    }

    fn prober(&self) -> Prober {
        let timeout_ms = self
            .args
            .timeout_ms
            .unwrap_or(self.context.config.settings.probe_timeout_ms);
        Prober::new(self.context.runner.clone())
            .with_platform(self.context.platform)
            .with_timeout(Duration::from_millis(timeout_ms))
    }

    fn batch_options(&self) -> BatchOptions {
        let settings = &self.context.config.settings;
        BatchOptions {
            concurrency: self.args.concurrency.unwrap_or(settings.concurrency),
            pause: Duration::from_millis(settings.batch_pause_ms),
        }
    }

    /// Report destination; `None` when no report should be written.
    ///
    /// With `--json` the report goes to stdout, so a file is written only
    /// when `--report` names one explicitly.
    pub fn report_path(&self) -> Option<PathBuf> {
        if self.args.no_report {
            return None;
        }
        match (&self.args.report, self.args.json) {
            (Some(path), _) => Some(path.clone()),
            (None, true) => None,
            (None, false) => Some(self.context.config.settings.report_path.clone()),
        }
    }

    fn write_report(&self, ui: &mut dyn UserInterface, report: &VerificationReport) {
        let Some(path) = self.report_path() else {
            return;
        };
        match report.write_to(&path) {
            Ok(()) if !self.args.json => {
                ui.hint(&format!("Report saved to {}", path.display()));
            }
            Ok(()) => {}
            Err(e) => {
                tracing::warn!("{}", e);
                if !self.args.json {
                    ui.warning(&e.to_string());
                }
            }
        }
    }
}

impl Command for VerifyCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let tools = self.context.selected_tools()?;
        let prober = self.prober();
        let options = self.batch_options();
        let human = !self.args.json;

        let started = Instant::now();
        tracing::info!(
            "Verifying {} tools on {} (timeout {:?})",
            tools.len(),
            prober.platform(),
            prober.timeout()
        );

        if human {
            ui.show_header("Developer tools verification");
        }

        let work = async {
            let system_info = SystemInfo::collect(self.context.runner.as_ref(), prober.platform()).await;
            if human {
                ui.message(&format!(
                    "Platform: {} ({}) · npm: {}",
                    system_info.platform, system_info.arch, system_info.npm_version
                ));
            }

            let mut spinner = ui.start_spinner(&format!("Checking {} tools...", tools.len()));
            let results: Vec<ProbeResult<'_>> =
                run_batch_with_progress(&prober, &tools, &options, |progress| {
                    spinner.set_message(&format!(
                        "Checking tools {}-{} of {}...",
                        progress.start + 1,
                        progress.end,
                        progress.total
                    ));
                })
                .await;
            spinner.clear();

            (system_info, results)
        };

        let (system_info, results) = match run_until_signal(work)? {
            RunOutcome::Completed(value) => value,
            RunOutcome::Interrupted(signal) => {
                ui.warning("Verification interrupted");
                return Ok(CommandResult::failure(signal.exit_code()));
            }
        };

        let wall_clock = started.elapsed();
        let summary = summarize(&results);
        tracing::info!(
            "Verified {}/{} tools ({} failed, {} skipped) in {:?}",
            summary.verified,
            summary.total,
            summary.failed,
            summary.skipped,
            wall_clock
        );

        let report = VerificationReport::new(&results, system_info, wall_clock);

        if human {
            show_results(ui, &results);
            show_summary(ui, &summary, wall_clock);
            show_suggestions(ui, &InstallSuggestions::from_results(&results, prober.platform()));
        } else {
            ui.message(&report.to_json()?);
        }
        self.write_report(ui, &report);

        if has_blocking_failure(&results) {
            tracing::info!("Critical tools are missing");
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Platform, ToolFilter};
    use crate::config::ArsenalConfig;
    use crate::shell::{CommandOutcome, MockRunner};
    use crate::ui::{MockUI, StatusKind};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn context(runner: Arc<MockRunner>, filter: ToolFilter) -> CommandContext {
        let mut config = ArsenalConfig::default();
        config.settings.batch_pause_ms = 0;
        CommandContext::new(config)
            .unwrap()
            .with_runner(runner)
            .with_filter(filter)
            .with_platform(Platform::Linux)
    }

    fn system_tools() -> ToolFilter {
        ToolFilter {
            critical_only: false,
            category: Some("system tools".into()),
        }
    }

    fn args_with_report(temp: &TempDir) -> VerifyArgs {
        VerifyArgs {
            report: Some(temp.path().join("report.json")),
            ..Default::default()
        }
    }

    #[test]
    fn non_critical_failures_exit_zero() {
        let temp = TempDir::new().unwrap();
        let runner = Arc::new(MockRunner::new());
        runner.respond("jq --version", CommandOutcome::exited(0, "jq-1.7.1\n", ""));
        let ctx = context(Arc::clone(&runner), system_tools());
        let mut ui = MockUI::new();

        let result = VerifyCommand::new(&ctx, args_with_report(&temp))
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result, CommandResult::success());
        assert!(ui.has_status(StatusKind::Verified, "jq"));
        assert!(ui.has_status(StatusKind::Failed, "bat"));
        assert!(ui.commands().iter().any(|c| c.contains("sudo apt install")));
        assert!(temp.path().join("report.json").exists());
    }

    #[test]
    fn critical_failure_exits_one() {
        let temp = TempDir::new().unwrap();
        let runner = Arc::new(MockRunner::new());
        let ctx = context(
            runner,
            ToolFilter {
                critical_only: true,
                category: None,
            },
        );
        let mut ui = MockUI::new();

        let result = VerifyCommand::new(&ctx, args_with_report(&temp))
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Critical tools missing"));
    }

    #[test]
    fn spinner_follows_groups() {
        let runner = Arc::new(MockRunner::new());
        let ctx = context(runner, system_tools());
        let mut ui = MockUI::new();
        let args = VerifyArgs {
            no_report: true,
            concurrency: Some(2),
            ..Default::default()
        };

        VerifyCommand::new(&ctx, args).execute(&mut ui).unwrap();

        assert_eq!(ui.spinners(), ["Checking 4 tools..."]);
        assert_eq!(
            ui.spinner_updates(),
            ["Checking tools 1-2 of 4...", "Checking tools 3-4 of 4..."]
        );
        assert_eq!(ui.spinner_finishes()[0].0, crate::ui::SpinnerStatus::Cleared);
    }

    #[test]
    fn json_mode_prints_report_only() {
        let runner = Arc::new(MockRunner::new());
        runner.respond("npm --version", CommandOutcome::exited(0, "10.2.0\n", ""));
        let ctx = context(runner, system_tools());
        let mut ui = MockUI::new();
        let args = VerifyArgs {
            json: true,
            ..Default::default()
        };

        VerifyCommand::new(&ctx, args).execute(&mut ui).unwrap();

        assert!(ui.headers().is_empty());
        assert_eq!(ui.messages().len(), 1);
        let value: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(value["statistics"]["totalTools"], 4);
        assert_eq!(value["systemInfo"]["npmVersion"], "10.2.0");
    }

    #[test]
    fn report_path_resolution() {
        let runner = Arc::new(MockRunner::new());
        let ctx = context(runner, ToolFilter::default());

        let default = VerifyCommand::new(&ctx, VerifyArgs::default());
        assert_eq!(
            default.report_path(),
            Some(PathBuf::from("tool-verification-report.json"))
        );

        let disabled = VerifyCommand::new(
            &ctx,
            VerifyArgs {
                no_report: true,
                ..Default::default()
            },
        );
        assert_eq!(disabled.report_path(), None);

        let json = VerifyCommand::new(
            &ctx,
            VerifyArgs {
                json: true,
                ..Default::default()
            },
        );
        assert_eq!(json.report_path(), None);
    }

    #[test]
    fn unwritable_report_is_a_warning() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let runner = Arc::new(MockRunner::new());
        let ctx = context(runner, system_tools());
        let mut ui = MockUI::new();
        let args = VerifyArgs {
            report: Some(blocker.join("report.json")),
            ..Default::default()
        };

        let result = VerifyCommand::new(&ctx, args).execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 0);
        assert!(ui.has_warning("Failed to save report"));
    }

    #[test]
    fn unknown_category_is_an_error() {
        let runner = Arc::new(MockRunner::new());
        let ctx = context(
            runner,
            ToolFilter {
                critical_only: false,
                category: Some("databases".into()),
            },
        );
        let mut ui = MockUI::new();

        let err = VerifyCommand::new(&ctx, VerifyArgs::default())
            .execute(&mut ui)
            .unwrap_err();

        assert!(matches!(err, crate::error::ArsenalError::UnknownCategory { .. }));
    }
}
