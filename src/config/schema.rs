//! Configuration schema definitions for arsenal.
//!
//! This module contains the struct definitions that map to
//! the YAML configuration file format.

use crate::catalog::{InstallSpec, InstallType, Platform, ToolDescriptor};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `.arsenal/config.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArsenalConfig {
    /// Global settings
    pub settings: Settings,

    /// Extra tools, appended to the built-in catalog or replacing an entry
    /// with the same name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<CustomTool>,
}

/// Tunables for probing, installing and reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Per-probe timeout in milliseconds
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Number of probes run concurrently in one batch
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Pause between batches in milliseconds
    #[serde(default = "default_batch_pause_ms")]
    pub batch_pause_ms: u64,

    /// Timeout for a single install attempt in milliseconds
    #[serde(default = "default_install_timeout_ms")]
    pub install_timeout_ms: u64,

    /// Timeout for install verification commands in milliseconds
    #[serde(default = "default_verify_timeout_ms")]
    pub verify_timeout_ms: u64,

    /// Install attempts per tool
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between install attempts in milliseconds
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Where `verify` writes its JSON report
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,

    /// Append logs to a file
    #[serde(default = "default_true")]
    pub logging: bool,

    /// Log file location; defaults to `dev-arsenal.log` in the temp dir
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            probe_timeout_ms: default_probe_timeout_ms(),
            concurrency: default_concurrency(),
            batch_pause_ms: default_batch_pause_ms(),
            install_timeout_ms: default_install_timeout_ms(),
            verify_timeout_ms: default_verify_timeout_ms(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            report_path: default_report_path(),
            logging: true,
            log_file: None,
        }
    }
}

impl Settings {
    /// Resolved log file path.
    pub fn log_file_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("dev-arsenal.log"))
    }
}

fn default_probe_timeout_ms() -> u64 {
    10_000
}

fn default_concurrency() -> usize {
    5
}

fn default_batch_pause_ms() -> u64 {
    100
}

fn default_install_timeout_ms() -> u64 {
    30_000
}

fn default_verify_timeout_ms() -> u64 {
    5_000
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    2_000
}

fn default_report_path() -> PathBuf {
    PathBuf::from("tool-verification-report.json")
}

fn default_true() -> bool {
    true
}

fn default_category() -> String {
    "Custom".to_string()
}

fn default_platforms() -> Vec<Platform> {
    Platform::ALL.to_vec()
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// A tool declared in config.
///
/// ```yaml
/// tools:
///   - name: hyperfine
///     command: hyperfine --version
///     category: Benchmarking
///     install_type: system
///     platforms: [darwin, linux]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomTool {
    /// Unique tool name
    pub name: String,

    /// Version-check command; defaults to `<name> --version`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Display category
    #[serde(default = "default_category")]
    pub category: String,

    /// One-line description
    #[serde(default)]
    pub description: String,

    /// Package providing the tool; defaults to the tool name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    /// How the package is normally installed
    #[serde(default)]
    pub install_type: InstallType,

    /// Whether a missing tool fails the run
    #[serde(default, skip_serializing_if = "is_false")]
    pub critical: bool,

    /// Platforms the tool applies to
    #[serde(default = "default_platforms")]
    pub platforms: Vec<Platform>,

    /// Automatic install recipe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install: Option<CustomInstall>,
}

/// Install recipe for a custom tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomInstall {
    /// Install command
    pub command: String,

    /// Verification command; defaults to the tool's probe command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify: Option<String>,

    /// Approximate download size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Attempts for this tool, overriding `settings.max_retries`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
}

impl CustomTool {
    /// Convert into a catalog descriptor, filling in defaults.
    pub fn to_descriptor(&self) -> ToolDescriptor {
        let probe_command = self
            .command
            .clone()
            .unwrap_or_else(|| format!("{} --version", self.name));

        let install = self.install.as_ref().map(|install| InstallSpec {
            command: install.command.clone(),
            verify: install
                .verify
                .clone()
                .unwrap_or_else(|| probe_command.clone()),
            size: install.size.clone(),
            max_retries: install.max_retries,
        });

        ToolDescriptor {
            name: self.name.clone(),
            package_name: self.package.clone().unwrap_or_else(|| self.name.clone()),
            probe_command,
            category: self.category.clone(),
            description: self.description.clone(),
            install_type: self.install_type,
            platforms: self.platforms.clone(),
            critical: self.critical,
            install,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: ArsenalConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.settings, Settings::default());
        assert!(config.tools.is_empty());
    }

    #[test]
    fn settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.probe_timeout_ms, 10_000);
        assert_eq!(settings.concurrency, 5);
        assert_eq!(settings.batch_pause_ms, 100);
        assert_eq!(settings.install_timeout_ms, 30_000);
        assert_eq!(settings.verify_timeout_ms, 5_000);
        assert_eq!(settings.max_retries, 2);
        assert_eq!(settings.retry_backoff_ms, 2_000);
        assert!(settings.logging);
    }

    #[test]
    fn partial_settings_keep_other_defaults() {
        let yaml = "settings:\n  concurrency: 8\n  logging: false\n";
        let config: ArsenalConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.settings.concurrency, 8);
        assert!(!config.settings.logging);
        assert_eq!(config.settings.probe_timeout_ms, 10_000);
    }

    #[test]
    fn log_file_defaults_to_temp_dir() {
        let settings = Settings::default();
        assert!(settings.log_file_path().ends_with("dev-arsenal.log"));
    }

    #[test]
    fn minimal_custom_tool_fills_defaults() {
        let yaml = "tools:\n  - name: hyperfine\n";
        let config: ArsenalConfig = serde_yaml::from_str(yaml).unwrap();
        let tool = config.tools[0].to_descriptor();

        assert_eq!(tool.probe_command, "hyperfine --version");
        assert_eq!(tool.package_name, "hyperfine");
        assert_eq!(tool.category, "Custom");
        assert_eq!(tool.install_type, InstallType::Npm);
        assert_eq!(tool.platforms, Platform::ALL.to_vec());
        assert!(tool.install.is_none());
    }

    #[test]
    fn custom_tool_with_install_recipe() {
        let yaml = r#"
tools:
  - name: hyperfine
    command: hyperfine -V
    category: Benchmarking
    install_type: system
    critical: true
    platforms: [darwin, linux]
    install:
      command: brew install hyperfine
      size: 3MB
      max_retries: 4
"#;
        let config: ArsenalConfig = serde_yaml::from_str(yaml).unwrap();
        let tool = config.tools[0].to_descriptor();

        assert!(tool.critical);
        assert_eq!(tool.platforms, vec![Platform::MacOS, Platform::Linux]);
        let install = tool.install.unwrap();
        assert_eq!(install.command, "brew install hyperfine");
        assert_eq!(install.verify, "hyperfine -V");
        assert_eq!(install.max_retries, Some(4));
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let yaml = "tools:\n  - name: x\n    platforms: [beos]\n";
        let result: Result<ArsenalConfig, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }
}
