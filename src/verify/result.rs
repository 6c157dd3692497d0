//! Probe result types.
//!
//! Every descriptor in a run produces exactly one [`ProbeResult`]. Failures
//! are values, not errors.

use crate::catalog::ToolDescriptor;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Detail recorded when the probe command exits non-zero.
pub const DETAIL_COMMAND_FAILED: &str = "command failed or not found";
/// Detail recorded when the probe command could not be started.
pub const DETAIL_SPAWN_FAILED: &str = "command not found or execution error";
/// Detail recorded when the probe exceeded its timeout.
pub const DETAIL_TIMEOUT: &str = "timeout";

/// Outcome classification of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    /// The tool ran and exited 0.
    Verified,
    /// Missing, broken, or too slow.
    Failed,
    /// Not applicable on this platform.
    Skipped,
}

impl ProbeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeStatus::Verified => "verified",
            ProbeStatus::Failed => "failed",
            ProbeStatus::Skipped => "skipped",
        }
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of probing one tool.
///
/// Borrows its descriptor from the catalog that produced the run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult<'a> {
    pub descriptor: &'a ToolDescriptor,
    pub status: ProbeStatus,
    /// Why the tool failed or was skipped.
    pub detail: Option<String>,
    /// Extracted version; only set when verified.
    pub version: Option<String>,
    /// Time spent probing; zero when skipped.
    pub elapsed: Duration,
    /// Raw error text; only set when failed.
    pub error: Option<String>,
}

impl<'a> ProbeResult<'a> {
    pub fn verified(descriptor: &'a ToolDescriptor, version: Option<String>, elapsed: Duration) -> Self {
        Self {
            descriptor,
            status: ProbeStatus::Verified,
            detail: None,
            version,
            elapsed,
            error: None,
        }
    }

    pub fn failed(
        descriptor: &'a ToolDescriptor,
        detail: &str,
        error: String,
        elapsed: Duration,
    ) -> Self {
        Self {
            descriptor,
            status: ProbeStatus::Failed,
            detail: Some(detail.to_string()),
            version: None,
            elapsed,
            error: Some(error),
        }
    }

    pub fn skipped(descriptor: &'a ToolDescriptor, detail: String) -> Self {
        Self {
            descriptor,
            status: ProbeStatus::Skipped,
            detail: Some(detail),
            version: None,
            elapsed: Duration::ZERO,
            error: None,
        }
    }

    pub fn name(&self) -> &'a str {
        &self.descriptor.name
    }

    pub fn is_verified(&self) -> bool {
        self.status == ProbeStatus::Verified
    }

    pub fn is_failed(&self) -> bool {
        self.status == ProbeStatus::Failed
    }

    pub fn is_skipped(&self) -> bool {
        self.status == ProbeStatus::Skipped
    }

    /// Failed and the tool is critical.
    pub fn is_blocking(&self) -> bool {
        self.is_failed() && self.descriptor.critical
    }
}
