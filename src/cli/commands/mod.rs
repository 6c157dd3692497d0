//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Commands that spawn processes
//! drive their async work through [`runtime::run_until_signal`] so an
//! interrupt stops every child cleanly.

pub mod completions;
pub mod config;
pub mod dispatcher;
pub mod display;
pub mod install;
pub mod list;
pub mod runtime;
pub mod verify;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
pub use runtime::{run_until_signal, RunOutcome, Shutdown};
