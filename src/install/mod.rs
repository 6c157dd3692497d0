//! Tool installation with retries and post-install verification.

pub mod installer;
pub mod outcome;
pub mod prerequisites;

pub use installer::{Installer, NO_INSTALLER, VERIFICATION_FAILED};
pub use outcome::{InstallOutcome, InstallPhase, InstallSummary};
pub use prerequisites::{
    check_prerequisites, needs_npm, PrerequisiteError, Prerequisites, MIN_NODE_MAJOR, MIN_NPM_MAJOR,
};
