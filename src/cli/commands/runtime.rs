//! Async runtime for commands that spawn processes.
//!
//! Commands stay synchronous; the ones that probe or install build a
//! multi-threaded tokio runtime and race their work against SIGINT and
//! SIGTERM. Dropping the interrupted future kills any child still running.

use std::future::Future;

use crate::error::{ArsenalError, Result};

/// Signal that cut a run short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// Ctrl+C.
    Interrupt,
    /// SIGTERM.
    Terminate,
}

impl Shutdown {
    /// Conventional exit code: 128 + signal number.
    pub fn exit_code(&self) -> i32 {
        match self {
            Shutdown::Interrupt => 130,
            Shutdown::Terminate => 143,
        }
    }
}

/// How a command's async work ended.
#[derive(Debug)]
pub enum RunOutcome<T> {
    Completed(T),
    Interrupted(Shutdown),
}

/// Run `future` to completion unless a shutdown signal arrives first.
pub fn run_until_signal<F, T>(future: F) -> Result<RunOutcome<T>>
where
    F: Future<Output = T>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| ArsenalError::Runtime(e.to_string()))?;

    Ok(runtime.block_on(async {
        tokio::select! {
            biased;

            signal = shutdown_signal() => {
                tracing::info!("Received {:?}, stopping", signal);
                RunOutcome::Interrupted(signal)
            }
            value = future => RunOutcome::Completed(value),
        }
    }))
}

async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No handler could be installed; never fire.
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn shutdown_signal() -> Shutdown {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => tokio::select! {
            _ = ctrl_c() => Shutdown::Interrupt,
            _ = terminate.recv() => Shutdown::Terminate,
        },
        Err(e) => {
            tracing::warn!("Cannot listen for SIGTERM: {}", e);
            ctrl_c().await;
            Shutdown::Interrupt
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> Shutdown {
    ctrl_c().await;
    Shutdown::Interrupt
}
