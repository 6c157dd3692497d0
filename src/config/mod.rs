//! Configuration loading and parsing for arsenal.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Layered merging in [`merger`]
//!
//! # Example
//!
//! ```
//! use arsenal::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".arsenal");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "settings:\n  concurrency: 3\n").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.settings.concurrency, 3);
//! ```
//!
//! # Configuration File Locations
//!
//! Merged in this order:
//! 1. User global config (`~/.arsenal/config.yml`)
//! 2. Project config (`.arsenal/config.yml`)
//! 3. Local overrides (`.arsenal/config.local.yml`)

pub mod loader;
pub mod merger;
pub mod schema;

pub use schema::{ArsenalConfig, CustomInstall, CustomTool, Settings};

pub use loader::{
    load_config, load_config_file, load_config_value, load_merged_config, parse_config,
    ConfigPaths, CONFIG_DIR,
};

pub use merger::{deep_merge, merge_configs};
