//! Tool installation with bounded retries.
//!
//! Each tool is first checked with its verification command. Tools that
//! already pass are left alone. Otherwise the install command runs up to
//! `max_retries` times with a fixed backoff between attempts, and every
//! attempt that exits 0 is re-verified before it counts.

use super::outcome::{InstallOutcome, InstallPhase};
use crate::catalog::{InstallSpec, ToolDescriptor};
use crate::config::Settings;
use crate::shell::{CommandOutcome, CommandRunner};
use std::sync::Arc;
use std::time::Duration;

/// Error recorded when the install exits 0 but verification still fails.
pub const VERIFICATION_FAILED: &str = "Installation completed but verification failed";

/// Error recorded for tools without an install recipe.
pub const NO_INSTALLER: &str = "no automatic installer available for this tool";

/// Runs install recipes.
#[derive(Clone)]
pub struct Installer {
    runner: Arc<dyn CommandRunner>,
    install_timeout: Duration,
    verify_timeout: Duration,
    backoff: Duration,
    max_retries: u32,
}

impl Installer {
    /// Create an installer with default timeouts (30 s install, 5 s verify),
    /// a 2 s backoff and 2 attempts per tool.
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            install_timeout: Duration::from_secs(30),
            verify_timeout: Duration::from_secs(5),
            backoff: Duration::from_secs(2),
            max_retries: 2,
        }
    }

    /// Create an installer configured from settings.
    pub fn from_settings(runner: Arc<dyn CommandRunner>, settings: &Settings) -> Self {
        Self::new(runner)
            .with_install_timeout(Duration::from_millis(settings.install_timeout_ms))
            .with_verify_timeout(Duration::from_millis(settings.verify_timeout_ms))
            .with_backoff(Duration::from_millis(settings.retry_backoff_ms))
            .with_max_retries(settings.max_retries)
    }

    pub fn with_install_timeout(mut self, timeout: Duration) -> Self {
        self.install_timeout = timeout;
        self
    }

    pub fn with_verify_timeout(mut self, timeout: Duration) -> Self {
        self.verify_timeout = timeout;
        self
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Default attempt limit for recipes that don't set their own.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Install one tool from its recipe.
    pub async fn install_one(&self, spec: &InstallSpec, max_retries: u32) -> InstallOutcome {
        self.install_one_observed(spec, max_retries, &mut |_| {}).await
    }

    /// Like [`install_one`](Self::install_one), reporting each phase change.
    pub async fn install_one_observed(
        &self,
        spec: &InstallSpec,
        max_retries: u32,
        on_phase: &mut dyn FnMut(&InstallPhase),
    ) -> InstallOutcome {
        let max = max_retries.max(1);
        on_phase(&InstallPhase::NotChecked);

        if self.verify(spec).await {
            tracing::debug!("'{}' already passes, skipping install", spec.verify);
            on_phase(&InstallPhase::AlreadyInstalled);
            return InstallOutcome::already_installed();
        }

        let mut last_error = String::new();
        for attempt in 1..=max {
            on_phase(&InstallPhase::Attempting { attempt, max });
            tracing::debug!("Install attempt {}/{}: {}", attempt, max, spec.command);

            match self.attempt(spec).await {
                Ok(()) => {
                    tracing::info!("Installed via '{}' after {} attempt(s)", spec.command, attempt);
                    on_phase(&InstallPhase::Verified { attempts: attempt });
                    return InstallOutcome::installed(attempt);
                }
                Err(error) => {
                    tracing::debug!("Attempt {}/{} failed: {}", attempt, max, error);
                    last_error = error;
                }
            }

            if attempt < max {
                on_phase(&InstallPhase::Retrying {
                    attempt,
                    max,
                    error: last_error.clone(),
                });
                tokio::time::sleep(self.backoff).await;
            }
        }

        tracing::warn!("Giving up on '{}' after {} attempts: {}", spec.command, max, last_error);
        on_phase(&InstallPhase::ExhaustedRetries {
            attempts: max,
            error: last_error.clone(),
        });
        InstallOutcome::failed(last_error, max)
    }

    /// Install tools one at a time, outcomes in input order.
    pub async fn install_all(&self, tools: &[&ToolDescriptor]) -> Vec<InstallOutcome> {
        self.install_all_observed(tools, |_, _, _| {}).await
    }

    /// Like [`install_all`](Self::install_all), reporting each tool's phase
    /// changes along with its index in `tools`.
    pub async fn install_all_observed<F>(
        &self,
        tools: &[&ToolDescriptor],
        mut on_phase: F,
    ) -> Vec<InstallOutcome>
    where
        F: FnMut(usize, &ToolDescriptor, &InstallPhase),
    {
        let mut outcomes = Vec::with_capacity(tools.len());

        for (index, tool) in tools.iter().enumerate() {
            let outcome = match &tool.install {
                Some(spec) => {
                    let max = spec.max_retries.unwrap_or(self.max_retries);
                    self.install_one_observed(spec, max, &mut |phase| on_phase(index, tool, phase))
                        .await
                }
                None => {
                    tracing::debug!("{} has no install recipe", tool.name);
                    let outcome = InstallOutcome::failed(NO_INSTALLER, 0);
                    on_phase(
                        index,
                        tool,
                        &InstallPhase::ExhaustedRetries {
                            attempts: 0,
                            error: NO_INSTALLER.to_string(),
                        },
                    );
                    outcome
                }
            };
            outcomes.push(outcome);
        }

        outcomes
    }

    async fn verify(&self, spec: &InstallSpec) -> bool {
        self.runner
            .run(&spec.verify, self.verify_timeout)
            .await
            .success()
    }

    async fn attempt(&self, spec: &InstallSpec) -> Result<(), String> {
        match self.runner.run(&spec.command, self.install_timeout).await {
            CommandOutcome::Exited { code: Some(0), .. } => {
                if self.verify(spec).await {
                    Ok(())
                } else {
                    Err(VERIFICATION_FAILED.to_string())
                }
            }
            CommandOutcome::Exited { code, stderr, .. } => Err(format!(
                "Installation failed with code {}: {}",
                code.map_or_else(|| "signal".to_string(), |c| c.to_string()),
                stderr.trim()
            )),
            CommandOutcome::SpawnFailed(message) => Err(message),
            CommandOutcome::TimedOut => Err("Installation timed out".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{InstallType, Platform};
    use crate::shell::MockRunner;

    const INSTALL: &str = "npm install -g demo";
    const VERIFY: &str = "demo --version";

    fn spec() -> InstallSpec {
        InstallSpec::new(INSTALL, VERIFY)
    }

    fn installer(runner: &Arc<MockRunner>) -> Installer {
        Installer::new(runner.clone()).with_backoff(Duration::ZERO)
    }

    fn ok() -> CommandOutcome {
        CommandOutcome::exited(0, "", "")
    }

    fn fail(stderr: &str) -> CommandOutcome {
        CommandOutcome::exited(1, "", stderr)
    }

    #[tokio::test]
    async fn already_installed_skips_install() {
        let runner = Arc::new(MockRunner::new());
        runner.respond(VERIFY, ok());

        let outcome = installer(&runner).install_one(&spec(), 2).await;

        assert_eq!(outcome, InstallOutcome::already_installed());
        assert_eq!(runner.call_count(INSTALL), 0);
    }

    #[tokio::test]
    async fn first_attempt_success() {
        let runner = Arc::new(MockRunner::new());
        runner.queue(VERIFY, vec![fail("missing"), ok()]);
        runner.respond(INSTALL, ok());

        let outcome = installer(&runner).install_one(&spec(), 2).await;

        assert_eq!(outcome, InstallOutcome::installed(1));
        assert_eq!(runner.call_count(INSTALL), 1);
    }

    #[tokio::test]
    async fn succeeds_on_second_attempt() {
        let runner = Arc::new(MockRunner::new());
        runner.queue(VERIFY, vec![fail("missing"), ok()]);
        runner.queue(INSTALL, vec![fail("EACCES"), ok()]);

        let outcome = installer(&runner).install_one(&spec(), 3).await;

        assert!(outcome.success);
        assert!(!outcome.skipped);
        assert_eq!(outcome.attempts, 2);
    }

    #[tokio::test]
    async fn verification_failure_is_retried() {
        let runner = Arc::new(MockRunner::new());
        runner.queue(VERIFY, vec![fail("missing"), fail("still missing"), ok()]);
        runner.respond(INSTALL, ok());

        let outcome = installer(&runner).install_one(&spec(), 2).await;

        assert_eq!(outcome, InstallOutcome::installed(2));
        assert_eq!(runner.call_count(INSTALL), 2);
    }

    #[tokio::test]
    async fn exhausted_retries_report_last_error() {
        let runner = Arc::new(MockRunner::new());
        runner.respond(VERIFY, fail("missing"));
        runner.queue(INSTALL, vec![fail("first"), fail("second"), fail("third")]);

        let outcome = installer(&runner).install_one(&spec(), 3).await;

        assert!(!outcome.success);
        assert_eq!(outcome.attempts, 3);
        assert_eq!(
            outcome.error.as_deref(),
            Some("Installation failed with code 1: third")
        );
    }

    #[tokio::test]
    async fn unverified_install_reports_verification_error() {
        let runner = Arc::new(MockRunner::new());
        runner.respond(VERIFY, fail("missing"));
        runner.respond(INSTALL, ok());

        let outcome = installer(&runner).install_one(&spec(), 2).await;

        assert_eq!(outcome.error.as_deref(), Some(VERIFICATION_FAILED));
        assert_eq!(outcome.attempts, 2);
    }

    #[tokio::test]
    async fn zero_retries_means_one_attempt() {
        let runner = Arc::new(MockRunner::new());
        runner.respond(VERIFY, fail("missing"));
        runner.respond(INSTALL, fail("nope"));

        let outcome = installer(&runner).install_one(&spec(), 0).await;

        assert_eq!(outcome.attempts, 1);
        assert_eq!(runner.call_count(INSTALL), 1);
    }

    #[tokio::test]
    async fn install_timeout_is_a_failed_attempt() {
        let runner = Arc::new(MockRunner::new());
        runner.respond(VERIFY, fail("missing"));
        runner.delay(INSTALL, Duration::from_secs(60));

        let outcome = installer(&runner)
            .with_install_timeout(Duration::from_millis(20))
            .install_one(&spec(), 1)
            .await;

        assert_eq!(outcome.error.as_deref(), Some("Installation timed out"));
    }

    #[tokio::test]
    async fn phases_are_reported_in_order() {
        let runner = Arc::new(MockRunner::new());
        runner.queue(VERIFY, vec![fail("missing"), ok()]);
        runner.queue(INSTALL, vec![fail("flaky"), ok()]);

        let mut phases = Vec::new();
        installer(&runner)
            .install_one_observed(&spec(), 2, &mut |p| phases.push(p.clone()))
            .await;

        assert_eq!(phases[0], InstallPhase::NotChecked);
        assert_eq!(phases[1], InstallPhase::Attempting { attempt: 1, max: 2 });
        assert!(matches!(phases[2], InstallPhase::Retrying { attempt: 1, .. }));
        assert_eq!(phases[3], InstallPhase::Attempting { attempt: 2, max: 2 });
        assert_eq!(phases[4], InstallPhase::Verified { attempts: 2 });
    }

    #[tokio::test]
    async fn backoff_only_between_attempts() {
        let runner = Arc::new(MockRunner::new());
        runner.respond(VERIFY, fail("missing"));
        runner.respond(INSTALL, fail("nope"));

        let start = std::time::Instant::now();
        Installer::new(runner.clone())
            .with_backoff(Duration::from_millis(40))
            .install_one(&spec(), 2)
            .await;
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_millis(40));
        assert!(elapsed < Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn install_all_keeps_order_and_flags_missing_recipes() {
        let runner = Arc::new(MockRunner::new());
        runner.respond(VERIFY, ok());

        let with_recipe = ToolDescriptor {
            name: "demo".into(),
            probe_command: VERIFY.into(),
            category: "Testing".into(),
            description: String::new(),
            package_name: "demo".into(),
            install_type: InstallType::Npm,
            platforms: Platform::ALL.to_vec(),
            critical: false,
            install: Some(spec()),
        };
        let without_recipe = ToolDescriptor {
            name: "jq".into(),
            install_type: InstallType::System,
            install: None,
            ..with_recipe.clone()
        };

        let outcomes = installer(&runner)
            .install_all(&[&without_recipe, &with_recipe])
            .await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0], InstallOutcome::failed(NO_INSTALLER, 0));
        assert_eq!(outcomes[1], InstallOutcome::already_installed());
    }
}
