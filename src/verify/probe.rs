//! Single-tool probe.
//!
//! A probe runs a tool's version-check command with a bounded timeout and
//! turns whatever happens into a [`ProbeResult`]. Probing never fails: spawn
//! errors, non-zero exits and timeouts are all recorded in the result.
//!
//! # Example
//!
//! ```
//! use arsenal::catalog::{Catalog, Platform};
//! use arsenal::shell::{CommandOutcome, MockRunner};
//! use arsenal::verify::{ProbeStatus, Prober};
//! use std::sync::Arc;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let jq = catalog.get("jq").unwrap();
//!
//! let runner = Arc::new(MockRunner::new());
//! runner.respond("jq --version", CommandOutcome::exited(0, "jq-1.7.1", ""));
//!
//! let prober = Prober::new(runner).with_platform(Platform::Linux);
//! let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
//! let result = rt.block_on(prober.probe(jq));
//! assert_eq!(result.status, ProbeStatus::Verified);
//! assert_eq!(result.version.as_deref(), Some("jq-1.7.1"));
//! ```

use super::result::{ProbeResult, DETAIL_COMMAND_FAILED, DETAIL_SPAWN_FAILED, DETAIL_TIMEOUT};
use super::version::extract_version;
use crate::catalog::{Platform, ToolDescriptor};
use crate::shell::{CommandOutcome, CommandRunner};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default per-probe timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs version-check commands and classifies the outcome.
#[derive(Clone)]
pub struct Prober {
    runner: Arc<dyn CommandRunner>,
    platform: Platform,
    timeout: Duration,
}

impl Prober {
    /// Create a prober for the current platform with the default timeout.
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            platform: Platform::current(),
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Probe as if running on `platform`.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe one tool.
    pub async fn probe<'a>(&self, descriptor: &'a ToolDescriptor) -> ProbeResult<'a> {
        if !descriptor.supports(self.platform) {
            tracing::debug!("Skipping {}: not supported on {}", descriptor.name, self.platform);
            return ProbeResult::skipped(
                descriptor,
                format!("not supported on {}", self.platform),
            );
        }

        let start = Instant::now();
        let outcome = self.runner.run(&descriptor.probe_command, self.timeout).await;
        let elapsed = start.elapsed();

        let result = classify(descriptor, outcome, elapsed, self.timeout);
        tracing::debug!(
            "Probed {} in {}ms: {}",
            descriptor.name,
            elapsed.as_millis(),
            result.status
        );
        result
    }
}

fn classify<'a>(
    descriptor: &'a ToolDescriptor,
    outcome: CommandOutcome,
    elapsed: Duration,
    timeout: Duration,
) -> ProbeResult<'a> {
    match outcome {
        CommandOutcome::Exited {
            code: Some(0),
            stdout,
            stderr,
        } => ProbeResult::verified(descriptor, extract_version(&stdout, &stderr), elapsed),
        CommandOutcome::Exited {
            code,
            stdout,
            stderr,
        } => {
            let error = first_non_blank(&[&stderr, &stdout]).unwrap_or_else(|| match code {
                Some(code) => format!("Exit code: {}", code),
                None => "terminated by signal".to_string(),
            });
            ProbeResult::failed(descriptor, DETAIL_COMMAND_FAILED, error, elapsed)
        }
        CommandOutcome::SpawnFailed(message) => {
            ProbeResult::failed(descriptor, DETAIL_SPAWN_FAILED, message, elapsed)
        }
        CommandOutcome::TimedOut => ProbeResult::failed(
            descriptor,
            DETAIL_TIMEOUT,
            format!("Command timed out after {}ms", timeout.as_millis()),
            elapsed,
        ),
    }
}

fn first_non_blank(candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{InstallType, Platform};
    use crate::shell::MockRunner;
    use crate::verify::ProbeStatus;

    fn tool(command: &str, platforms: Vec<Platform>) -> ToolDescriptor {
        ToolDescriptor {
            name: "demo".to_string(),
            probe_command: command.to_string(),
            category: "Testing".to_string(),
            description: String::new(),
            package_name: "demo".to_string(),
            install_type: InstallType::Npm,
            platforms,
            critical: false,
            install: None,
        }
    }

    fn prober(runner: &Arc<MockRunner>) -> Prober {
        Prober::new(runner.clone()).with_platform(Platform::Linux)
    }

    #[tokio::test]
    async fn unsupported_platform_is_skipped_without_running() {
        let runner = Arc::new(MockRunner::new());
        let descriptor = tool("demo --version", vec![Platform::MacOS]);

        let result = prober(&runner).probe(&descriptor).await;

        assert_eq!(result.status, ProbeStatus::Skipped);
        assert_eq!(result.detail.as_deref(), Some("not supported on linux"));
        assert_eq!(result.elapsed, Duration::ZERO);
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn exit_zero_is_verified_with_version() {
        let runner = Arc::new(MockRunner::new());
        runner.respond("demo --version", CommandOutcome::exited(0, "demo v2.4.1\n", ""));
        let descriptor = tool("demo --version", Platform::ALL.to_vec());

        let result = prober(&runner).probe(&descriptor).await;

        assert_eq!(result.status, ProbeStatus::Verified);
        assert_eq!(result.version.as_deref(), Some("2.4.1"));
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn nonzero_exit_prefers_stderr() {
        let runner = Arc::new(MockRunner::new());
        runner.respond("demo --version", CommandOutcome::exited(2, "out", " bad flag \n"));
        let descriptor = tool("demo --version", Platform::ALL.to_vec());

        let result = prober(&runner).probe(&descriptor).await;

        assert_eq!(result.status, ProbeStatus::Failed);
        assert_eq!(result.detail.as_deref(), Some(DETAIL_COMMAND_FAILED));
        assert_eq!(result.error.as_deref(), Some("bad flag"));
        assert!(result.version.is_none());
    }

    #[tokio::test]
    async fn nonzero_exit_without_output_reports_code() {
        let runner = Arc::new(MockRunner::new());
        runner.respond("demo --version", CommandOutcome::exited(1, "", ""));
        let descriptor = tool("demo --version", Platform::ALL.to_vec());

        let result = prober(&runner).probe(&descriptor).await;
        assert_eq!(result.error.as_deref(), Some("Exit code: 1"));
    }

    #[tokio::test]
    async fn spawn_failure_is_recorded() {
        let runner = Arc::new(MockRunner::new());
        runner.respond(
            "demo --version",
            CommandOutcome::SpawnFailed("No such file or directory".into()),
        );
        let descriptor = tool("demo --version", Platform::ALL.to_vec());

        let result = prober(&runner).probe(&descriptor).await;
        assert_eq!(result.detail.as_deref(), Some(DETAIL_SPAWN_FAILED));
        assert_eq!(result.error.as_deref(), Some("No such file or directory"));
    }

    #[tokio::test]
    async fn timeout_is_failed_with_message() {
        let runner = Arc::new(MockRunner::new());
        runner.delay("demo --version", Duration::from_secs(60));
        let descriptor = tool("demo --version", Platform::ALL.to_vec());

        let result = prober(&runner)
            .with_timeout(Duration::from_millis(50))
            .probe(&descriptor)
            .await;

        assert_eq!(result.status, ProbeStatus::Failed);
        assert!(result.detail.as_deref().unwrap().contains("timeout"));
        assert_eq!(result.error.as_deref(), Some("Command timed out after 50ms"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn real_shell_echo_is_verified() {
        let descriptor = tool("echo 1.2.3", Platform::ALL.to_vec());
        let prober = Prober::new(Arc::new(crate::shell::ShellRunner)).with_platform(Platform::Linux);

        let result = prober.probe(&descriptor).await;

        assert_eq!(result.status, ProbeStatus::Verified);
        assert_eq!(result.version.as_deref(), Some("1.2.3"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn real_shell_hang_times_out_quickly() {
        let descriptor = tool("sleep 30", Platform::ALL.to_vec());
        let prober = Prober::new(Arc::new(crate::shell::ShellRunner))
            .with_platform(Platform::Linux)
            .with_timeout(Duration::from_millis(50));

        let start = Instant::now();
        let result = prober.probe(&descriptor).await;

        assert_eq!(result.status, ProbeStatus::Failed);
        assert_eq!(result.detail.as_deref(), Some(DETAIL_TIMEOUT));
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn lingering_background_job_cannot_outlive_timeout() {
        let descriptor = tool("sleep 3 & echo 1.2.3", Platform::ALL.to_vec());
        let prober = Prober::new(Arc::new(crate::shell::ShellRunner))
            .with_platform(Platform::Linux)
            .with_timeout(Duration::from_millis(200));

        let start = Instant::now();
        let result = prober.probe(&descriptor).await;

        assert_eq!(result.status, ProbeStatus::Failed);
        assert_eq!(result.detail.as_deref(), Some(DETAIL_TIMEOUT));
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
