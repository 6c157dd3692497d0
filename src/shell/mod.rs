//! Shell command execution.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{CommandOutcome, CommandRunner, ShellRunner};
pub use mock::MockRunner;
pub use platform::{is_ci, shell_invocation};
