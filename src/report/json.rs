//! JSON verification report.
//!
//! The report is a camelCase JSON document describing the host, the run
//! statistics and every probe result. It is written after each `verify`
//! run unless disabled.

use crate::catalog::{InstallType, Platform};
use crate::error::{ArsenalError, Result};
use crate::shell::{CommandOutcome, CommandRunner};
use crate::verify::{summarize, ProbeResult, ProbeStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Shown when npm is missing or broken.
pub const NPM_NOT_FOUND: &str = "Not found";

/// Host information included in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub platform: String,
    pub arch: String,
    pub npm_version: String,
}

impl SystemInfo {
    /// Gather host details, asking npm for its version.
    pub async fn collect(runner: &dyn CommandRunner, platform: Platform) -> Self {
        let npm_version = match runner.run("npm --version", Duration::from_secs(5)).await {
            CommandOutcome::Exited {
                code: Some(0),
                stdout,
                ..
            } if !stdout.trim().is_empty() => stdout.trim().to_string(),
            _ => NPM_NOT_FOUND.to_string(),
        };

        Self {
            platform: platform.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            npm_version,
        }
    }
}

/// Run totals as they appear in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatistics {
    pub total_tools: usize,
    pub verified: usize,
    pub failed: usize,
    /// Skipped tools.
    pub warnings: usize,
    pub success_rate: u32,
    /// Wall-clock duration of the run in seconds.
    pub duration: f64,
}

/// One probe result as it appears in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub name: String,
    pub category: String,
    pub description: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Probe duration in milliseconds.
    pub duration: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub critical: bool,
    pub install_type: InstallType,
    pub package_name: String,
}

impl From<&ProbeResult<'_>> for ReportEntry {
    fn from(result: &ProbeResult<'_>) -> Self {
        let tool = result.descriptor;
        Self {
            name: tool.name.clone(),
            category: tool.category.clone(),
            description: tool.description.clone(),
            status: result.status.to_string(),
            version: result.version.clone(),
            duration: result.elapsed.as_millis() as u64,
            error: result.error.clone(),
            reason: result.detail.clone(),
            critical: tool.critical,
            install_type: tool.install_type,
            package_name: tool.package_name.clone(),
        }
    }
}

/// The full verification report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub system_info: SystemInfo,
    pub statistics: ReportStatistics,
    pub results: Vec<ReportEntry>,
}

impl VerificationReport {
    /// Build a report from a finished run.
    pub fn new(results: &[ProbeResult<'_>], system_info: SystemInfo, wall_clock: Duration) -> Self {
        let summary = summarize(results);
        Self {
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            system_info,
            statistics: ReportStatistics {
                total_tools: summary.total,
                verified: summary.verified,
                failed: summary.failed,
                warnings: summary.skipped,
                success_rate: summary.success_rate_percent,
                duration: wall_clock.as_secs_f64(),
            },
            results: results.iter().map(ReportEntry::from).collect(),
        }
    }

    /// Count of entries with the given status.
    pub fn count(&self, status: ProbeStatus) -> usize {
        let status = status.as_str();
        self.results.iter().filter(|r| r.status == status).count()
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ArsenalError::Other(e.into()))
    }

    /// Write the report to `path`, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let failed = |message: String| ArsenalError::ReportWriteFailed {
            path: path.to_path_buf(),
            message,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| failed(e.to_string()))?;
        }
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| failed(e.to_string()))?;

        tracing::info!("Report saved to {}", path.display());
        Ok(())
    }
}
