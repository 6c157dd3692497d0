//! Checks that must pass before npm-based installs run.
//!
//! Node.js and npm have to be present and recent enough. The registry
//! ping is advisory: a failure only means some installs may not work.

use crate::catalog::ToolDescriptor;
use crate::shell::{CommandOutcome, CommandRunner};
use std::time::Duration;
use thiserror::Error;

/// Oldest supported Node.js major version.
pub const MIN_NODE_MAJOR: u32 = 16;

/// Oldest supported npm major version.
pub const MIN_NPM_MAJOR: u32 = 8;

const VERSION_TIMEOUT: Duration = Duration::from_secs(5);
const PING_TIMEOUT: Duration = Duration::from_secs(10);

/// A prerequisite that blocks installation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrerequisiteError {
    #[error("{tool} not found")]
    Missing { tool: &'static str },

    #[error("{tool} {required}+ is required (found {found})")]
    TooOld {
        tool: &'static str,
        required: u32,
        found: String,
    },
}

impl PrerequisiteError {
    /// What the user can do about it.
    pub fn hint(&self) -> &'static str {
        match self {
            PrerequisiteError::Missing { .. } => "Install Node.js (which ships npm): https://nodejs.org",
            PrerequisiteError::TooOld { tool: "npm", .. } => {
                "Update npm: npm install -g npm@latest"
            }
            PrerequisiteError::TooOld { .. } => "Update Node.js: https://nodejs.org",
        }
    }
}

/// Versions found by a successful check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prerequisites {
    pub node_version: String,
    pub npm_version: String,
    /// Whether `npm ping` reached the registry.
    pub registry_reachable: bool,
}

/// Whether any selected recipe installs through npm.
pub fn needs_npm(tools: &[&ToolDescriptor]) -> bool {
    tools.iter().any(|tool| {
        tool.install
            .as_ref()
            .is_some_and(|spec| spec.command.split_whitespace().next() == Some("npm"))
    })
}

/// Check Node.js, npm and registry connectivity.
pub async fn check_prerequisites(
    runner: &dyn CommandRunner,
) -> Result<Prerequisites, PrerequisiteError> {
    let node_version = required_version(runner, "node", MIN_NODE_MAJOR).await?;
    let npm_version = required_version(runner, "npm", MIN_NPM_MAJOR).await?;

    let registry_reachable = runner.run("npm ping", PING_TIMEOUT).await.success();
    if !registry_reachable {
        tracing::debug!("npm ping failed; the registry may be unreachable");
    }

    Ok(Prerequisites {
        node_version,
        npm_version,
        registry_reachable,
    })
}

async fn required_version(
    runner: &dyn CommandRunner,
    tool: &'static str,
    required: u32,
) -> Result<String, PrerequisiteError> {
    let command = format!("{} --version", tool);
    let version = match runner.run(&command, VERSION_TIMEOUT).await {
        CommandOutcome::Exited {
            code: Some(0),
            stdout,
            ..
        } => stdout.trim().to_string(),
        other => {
            tracing::debug!("'{}' did not succeed: {:?}", command, other);
            return Err(PrerequisiteError::Missing { tool });
        }
    };

    match major_version(&version) {
        Some(major) if major >= required => {
            tracing::debug!("{} {} satisfies {}+", tool, version, required);
            Ok(version)
        }
        _ => Err(PrerequisiteError::TooOld {
            tool,
            required,
            found: version,
        }),
    }
}

/// Leading major number of `v20.11.0` or `10.2.4`.
fn major_version(version: &str) -> Option<u32> {
    version
        .trim()
        .trim_start_matches('v')
        .split('.')
        .next()?
        .parse()
        .ok()
}
