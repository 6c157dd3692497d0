//! Shell completions generation.
//!
//! `arsenal completions <shell>` prints a completion script to stdout.

use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

const BIN_NAME: &str = "arsenal";

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }
}

/// Write the completion script for `shell` into `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, out);
}

impl Command for CompletionsCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut stdout = std::io::stdout().lock();
        write_completions(self.args.shell, &mut stdout);
        stdout.flush()?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(shell: Shell) -> String {
        let mut buf = Vec::new();
        write_completions(shell, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn bash_script_names_binary_and_subcommands() {
        let output = script(Shell::Bash);
        assert!(output.contains("arsenal"));
        assert!(output.contains("complete"));
        assert!(output.contains("install"));
    }

    #[test]
    fn zsh_and_fish_scripts() {
        assert!(script(Shell::Zsh).contains("arsenal"));
        assert!(script(Shell::Fish).contains("--critical-only"));
    }
}
