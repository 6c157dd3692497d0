//! Shell command execution with a timeout.
//!
//! Commands run through the host shell with stdout and stderr captured
//! separately. Waiting for the child and draining its pipes share one
//! deadline; on timeout the child is killed and reaped.

use super::platform::shell_invocation;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;

/// How a shell command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The process ran to completion.
    Exited {
        /// Exit code (None if killed by signal).
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// The process could not be started.
    SpawnFailed(String),

    /// The timeout fired first and the process was killed.
    TimedOut,
}

impl CommandOutcome {
    /// Whether the command exited with code 0.
    pub fn success(&self) -> bool {
        matches!(self, CommandOutcome::Exited { code: Some(0), .. })
    }

    /// Convenience constructor for a finished process.
    pub fn exited(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        CommandOutcome::Exited {
            code: Some(code),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}

/// Runs shell command lines.
///
/// The production implementation is [`ShellRunner`]; tests substitute
/// [`MockRunner`](super::MockRunner).
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` through the host shell, giving up after `timeout`.
    async fn run(&self, command: &str, timeout: Duration) -> CommandOutcome;
}

/// Runs commands with `sh -c` (or `cmd /C` on Windows) via `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str, timeout: Duration) -> CommandOutcome {
        let (shell, flag) = shell_invocation();

        let mut child = match Command::new(shell)
            .arg(flag)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                tracing::debug!("Failed to spawn '{}': {}", command, e);
                return CommandOutcome::SpawnFailed(e.to_string());
            }
        };

        let mut stdout = child.stdout.take().map(read_pipe);
        let mut stderr = child.stderr.take().map(read_pipe);

        // Grandchildren can keep the pipes open after the shell exits, so
        // draining them shares the deadline with the wait.
        let finished = tokio::time::timeout(timeout, async {
            let status = child.wait().await;
            let out = collect(stdout.as_mut()).await;
            let err = collect(stderr.as_mut()).await;
            (status, out, err)
        })
        .await;

        match finished {
            Ok((Ok(status), stdout, stderr)) => CommandOutcome::Exited {
                code: status.code(),
                stdout,
                stderr,
            },
            Ok((Err(e), _, _)) => CommandOutcome::SpawnFailed(e.to_string()),
            Err(_) => {
                tracing::debug!("'{}' timed out after {}ms, killing", command, timeout.as_millis());
                if let Err(e) = child.start_kill() {
                    tracing::debug!("Failed to kill '{}': {}", command, e);
                }
                let _ = child.wait().await;
                for handle in [stdout, stderr].into_iter().flatten() {
                    handle.abort();
                }
                CommandOutcome::TimedOut
            }
        }
    }
}

fn read_pipe<R>(mut pipe: R) -> JoinHandle<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf).await;
        String::from_utf8_lossy(&buf).into_owned()
    })
}

async fn collect(handle: Option<&mut JoinHandle<String>>) -> String {
    match handle {
        Some(handle) => handle.await.unwrap_or_default(),
        None => String::new(),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Instant;

    const LONG: Duration = Duration::from_secs(10);

    #[tokio::test]
    async fn captures_stdout() {
        let outcome = ShellRunner.run("echo hello", LONG).await;
        assert!(outcome.success());
        match outcome {
            CommandOutcome::Exited { stdout, .. } => assert_eq!(stdout.trim(), "hello"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn captures_stderr_separately() {
        let outcome = ShellRunner.run("echo oops >&2", LONG).await;
        match outcome {
            CommandOutcome::Exited { stdout, stderr, .. } => {
                assert!(stdout.is_empty());
                assert_eq!(stderr.trim(), "oops");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn reports_exit_code() {
        let outcome = ShellRunner.run("exit 3", LONG).await;
        assert!(!outcome.success());
        assert!(matches!(outcome, CommandOutcome::Exited { code: Some(3), .. }));
    }

    #[tokio::test]
    async fn missing_binary_exits_127() {
        let outcome = ShellRunner
            .run("definitely-not-a-real-tool-xyz --version", LONG)
            .await;
        assert!(matches!(outcome, CommandOutcome::Exited { code: Some(127), .. }));
    }

    #[tokio::test]
    async fn kills_on_timeout() {
        let start = Instant::now();
        let outcome = ShellRunner.run("sleep 5", Duration::from_millis(50)).await;
        assert_eq!(outcome, CommandOutcome::TimedOut);
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn background_child_holding_pipes_times_out() {
        let start = Instant::now();
        let outcome = ShellRunner
            .run("sleep 3 & echo 1.2.3", Duration::from_millis(200))
            .await;
        assert_eq!(outcome, CommandOutcome::TimedOut);
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
