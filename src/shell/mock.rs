//! Scripted command runner for testing.
//!
//! `MockRunner` implements [`CommandRunner`] without starting processes.
//! Responses are configured per command line, and every call is recorded
//! for later assertion.
//!
//! # Example
//!
//! ```
//! use arsenal::shell::{CommandOutcome, CommandRunner, MockRunner};
//! use std::time::Duration;
//!
//! let runner = MockRunner::new();
//! runner.respond("jq --version", CommandOutcome::exited(0, "jq-1.7.1\n", ""));
//!
//! let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
//! let outcome = rt.block_on(runner.run("jq --version", Duration::from_secs(1)));
//! assert!(outcome.success());
//! assert_eq!(runner.call_count("jq --version"), 1);
//! ```

use super::command::{CommandOutcome, CommandRunner};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Default)]
struct Script {
    responses: HashMap<String, CommandOutcome>,
    queues: HashMap<String, VecDeque<CommandOutcome>>,
    delays: HashMap<String, Duration>,
    calls: Vec<String>,
}

/// Command runner double with scripted outcomes.
///
/// Unconfigured commands behave like a missing binary: exit code 127 with
/// a "command not found" message on stderr.
#[derive(Debug, Default)]
pub struct MockRunner {
    script: Mutex<Script>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer `command` with `outcome`.
    pub fn respond(&self, command: &str, outcome: CommandOutcome) {
        self.lock().responses.insert(command.to_string(), outcome);
    }

    /// Answer successive calls of `command` with `outcomes` in order.
    ///
    /// After the queue runs dry, falls back to `respond` or the default.
    pub fn queue(&self, command: &str, outcomes: Vec<CommandOutcome>) {
        self.lock()
            .queues
            .insert(command.to_string(), outcomes.into_iter().collect());
    }

    /// Make `command` take `delay` before answering.
    ///
    /// If the delay exceeds the caller's timeout the call yields
    /// [`CommandOutcome::TimedOut`] once the timeout elapses.
    pub fn delay(&self, command: &str, delay: Duration) {
        self.lock().delays.insert(command.to_string(), delay);
    }

    /// Every command line run so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// How many times `command` was run.
    pub fn call_count(&self, command: &str) -> usize {
        self.lock().calls.iter().filter(|c| *c == command).count()
    }

    /// Highest number of calls that were running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn next_outcome(&self, command: &str) -> CommandOutcome {
        let mut script = self.lock();
        if let Some(outcome) = script.queues.get_mut(command).and_then(VecDeque::pop_front) {
            return outcome;
        }
        script
            .responses
            .get(command)
            .cloned()
            .unwrap_or_else(|| CommandOutcome::Exited {
                code: Some(127),
                stdout: String::new(),
                stderr: format!("sh: {}: command not found", first_word(command)),
            })
    }
}

fn first_word(command: &str) -> &str {
    command.split_whitespace().next().unwrap_or(command)
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, command: &str, timeout: Duration) -> CommandOutcome {
        let delay = {
            let mut script = self.lock();
            script.calls.push(command.to_string());
            script.delays.get(command).copied()
        };

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let outcome = match delay {
            Some(delay) if delay > timeout => {
                tokio::time::sleep(timeout).await;
                CommandOutcome::TimedOut
            }
            Some(delay) => {
                tokio::time::sleep(delay).await;
                self.next_outcome(command)
            }
            None => {
                tokio::task::yield_now().await;
                self.next_outcome(command)
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}
