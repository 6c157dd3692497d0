//! Arsenal - verify and install developer command-line tools.
//!
//! Arsenal probes a catalog of CLI tools by running their version commands
//! in concurrency-bounded batches, reports what is missing with platform
//! specific install suggestions, and installs selected tools with retries.
//!
//! # Modules
//!
//! - [`catalog`] - Tool descriptors, the built-in catalog and filters
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and merging
//! - [`error`] - Error types and result aliases
//! - [`install`] - Installation with bounded retries
//! - [`report`] - JSON report and install suggestions
//! - [`shell`] - Shell command execution with timeouts
//! - [`ui`] - Prompts, spinners, and terminal output
//! - [`verify`] - Probing, batching and summaries
//!
//! # Example
//!
//! ```
//! use arsenal::catalog::{Catalog, ToolFilter};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let filter = ToolFilter {
//!     critical_only: true,
//!     category: None,
//! };
//! let critical = filter.apply(&catalog).unwrap();
//! assert!(critical.iter().any(|t| t.name == "prettier"));
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod install;
pub mod report;
pub mod shell;
pub mod ui;
pub mod verify;

pub use error::{ArsenalError, Result};
