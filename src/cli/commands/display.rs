//! Shared display helpers for probe results.
//!
//! These helpers are used by `verify` and `install` to render
//! [`ProbeResult`] values, run totals and install suggestions consistently.

use std::time::Duration;

use crate::report::InstallSuggestions;
use crate::ui::{format_duration, StatusKind, UserInterface};
use crate::verify::{group_by_category, BatchSummary, ProbeResult, ProbeStatus};

/// Shown next to a failed tool.
pub const NOT_INSTALLED: &str = "Not installed";

/// Return a StatusKind for a probe status.
pub fn status_kind(status: ProbeStatus) -> StatusKind {
    match status {
        ProbeStatus::Verified => StatusKind::Verified,
        ProbeStatus::Failed => StatusKind::Failed,
        ProbeStatus::Skipped => StatusKind::Skipped,
    }
}

/// Text shown after a tool's name.
pub fn probe_detail(result: &ProbeResult<'_>, verbose: bool) -> String {
    match result.status {
        ProbeStatus::Verified => result.version.clone().unwrap_or_default(),
        ProbeStatus::Failed if verbose => match (&result.detail, &result.error) {
            (Some(detail), Some(error)) => format!("{}: {} ({})", NOT_INSTALLED, detail, error),
            (Some(detail), None) => format!("{}: {}", NOT_INSTALLED, detail),
            _ => NOT_INSTALLED.to_string(),
        },
        ProbeStatus::Failed => NOT_INSTALLED.to_string(),
        ProbeStatus::Skipped => result.detail.clone().unwrap_or_default(),
    }
}

/// Render results grouped by category.
///
/// Outside normal and verbose mode only failed tools are listed, and
/// categories without failures are left out.
pub fn show_results(ui: &mut dyn UserInterface, results: &[ProbeResult<'_>]) {
    let mode = ui.output_mode();
    let verbose = mode.shows_details();

    for group in group_by_category(results) {
        let shown: Vec<_> = group
            .results
            .iter()
            .filter(|r| mode.shows_passing() || r.is_failed())
            .collect();
        if shown.is_empty() {
            continue;
        }

        ui.show_section(group.category);
        for result in shown {
            ui.show_status(
                status_kind(result.status),
                result.name(),
                &probe_detail(result, verbose),
            );
            if verbose && !result.is_skipped() {
                ui.hint(&format!(
                    "$ {} ({})",
                    result.descriptor.probe_command,
                    format_duration(result.elapsed)
                ));
            }
        }
    }
}

/// Render run totals.
pub fn show_summary(ui: &mut dyn UserInterface, summary: &BatchSummary, wall_clock: Duration) {
    ui.show_header("Summary");
    ui.message(&format!("  Total tools checked: {}", summary.total));
    ui.message(&format!("  Verified:            {}", summary.verified));
    ui.message(&format!("  Failed:              {}", summary.failed));
    ui.message(&format!("  Skipped:             {}", summary.skipped));
    ui.message(&format!("  Success rate:        {}%", summary.success_rate_percent));
    ui.message(&format!("  Duration:            {}", format_duration(wall_clock)));
}

/// Render install suggestions, or a success line when nothing failed.
pub fn show_suggestions(ui: &mut dyn UserInterface, suggestions: &InstallSuggestions) {
    if suggestions.is_empty() {
        ui.success("All supported tools are installed!");
        return;
    }

    ui.show_header("Installation suggestions");
    for section in &suggestions.sections {
        ui.show_section(section.title);
        for line in &section.lines {
            ui.show_command(line);
        }
    }

    if !suggestions.critical_missing.is_empty() {
        ui.message("");
        ui.error("Critical tools missing:");
        for missing in &suggestions.critical_missing {
            ui.message(&format!("  • {} - {}", missing.name, missing.description));
        }
        ui.hint("These tools are essential for basic development workflows.");
    }
}
