//! Tool descriptor types.
//!
//! A [`ToolDescriptor`] is the static description of one external tool:
//! how to probe it, where it applies, and how it can be installed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Host platform a tool can be relevant on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[serde(alias = "win32")]
    Windows,
    #[serde(alias = "darwin")]
    MacOS,
    Linux,
}

impl Platform {
    /// All platforms, in display order.
    pub const ALL: [Platform; 3] = [Platform::Windows, Platform::MacOS, Platform::Linux];

    /// Detect the current platform.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// Lowercase identifier used in messages and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::MacOS => "macos",
            Platform::Linux => "linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" | "win32" => Ok(Platform::Windows),
            "macos" | "darwin" => Ok(Platform::MacOS),
            "linux" => Ok(Platform::Linux),
            _ => Err(format!("unknown platform: {}", s)),
        }
    }
}

/// How a tool is normally installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallType {
    /// Global npm package.
    #[default]
    Npm,
    /// Vendor install script fetched over HTTP.
    Curl,
    /// Native package manager (Homebrew, apt, dnf, Scoop).
    System,
}

impl InstallType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallType::Npm => "npm",
            InstallType::Curl => "curl",
            InstallType::System => "system",
        }
    }
}

impl fmt::Display for InstallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How to install a tool and confirm the install worked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSpec {
    /// Shell command that installs the tool.
    pub command: String,
    /// Shell command that exits 0 once the tool is usable.
    pub verify: String,
    /// Approximate download size, e.g. `"2.1MB"` or `"890KB"`.
    pub size: Option<String>,
    /// Per-tool retry limit; falls back to the configured default.
    pub max_retries: Option<u32>,
}

impl InstallSpec {
    /// Create a spec with no size estimate or retry override.
    pub fn new(command: impl Into<String>, verify: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            verify: verify.into(),
            size: None,
            max_retries: None,
        }
    }

    /// Size estimate in megabytes, if one is given and parseable.
    pub fn size_mb(&self) -> Option<f64> {
        self.size.as_deref().and_then(parse_size_mb)
    }
}

/// Parse a size string like `"2.1MB"`, `"890KB"` or `"1GB"` into megabytes.
pub fn parse_size_mb(size: &str) -> Option<f64> {
    let trimmed = size.trim();
    let split = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(split);
    let value: f64 = number.parse().ok()?;

    match unit.trim().to_uppercase().as_str() {
        "" | "MB" | "M" => Some(value),
        "KB" | "K" => Some(value / 1024.0),
        "GB" | "G" => Some(value * 1024.0),
        _ => None,
    }
}

/// Static description of one tool to probe and optionally install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    /// Unique short identifier (e.g. "rg").
    pub name: String,
    /// Shell command whose exit code and output reveal presence and version.
    pub probe_command: String,
    /// Display category (e.g. "File Operations").
    pub category: String,
    /// One-line description.
    pub description: String,
    /// Package that provides the tool.
    pub package_name: String,
    /// How the package is normally installed.
    pub install_type: InstallType,
    /// Platforms this tool is relevant on. Never empty.
    pub platforms: Vec<Platform>,
    /// Whether a failed probe blocks the workflow.
    pub critical: bool,
    /// Automatic installation recipe, if the installer supports this tool.
    pub install: Option<InstallSpec>,
}

impl ToolDescriptor {
    /// Whether this tool applies to the given platform.
    pub fn supports(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(platforms: Vec<Platform>) -> ToolDescriptor {
        ToolDescriptor {
            name: "jq".to_string(),
            probe_command: "jq --version".to_string(),
            category: "System Tools".to_string(),
            description: "JSON processor".to_string(),
            package_name: "jq".to_string(),
            install_type: InstallType::System,
            platforms,
            critical: false,
            install: None,
        }
    }

    #[test]
    fn platform_current_is_supported_value() {
        assert!(Platform::ALL.contains(&Platform::current()));
    }

    #[test]
    fn platform_parses_node_style_aliases() {
        assert_eq!("win32".parse::<Platform>().unwrap(), Platform::Windows);
        assert_eq!("darwin".parse::<Platform>().unwrap(), Platform::MacOS);
        assert_eq!("Linux".parse::<Platform>().unwrap(), Platform::Linux);
        assert!("beos".parse::<Platform>().is_err());
    }

    #[test]
    fn platform_deserializes_aliases() {
        let platforms: Vec<Platform> = serde_yaml::from_str("[win32, darwin, linux]").unwrap();
        assert_eq!(platforms, Platform::ALL.to_vec());
    }

    #[test]
    fn platform_displays_lowercase() {
        assert_eq!(Platform::MacOS.to_string(), "macos");
    }

    #[test]
    fn supports_checks_platform_list() {
        let tool = descriptor(vec![Platform::MacOS, Platform::Linux]);
        assert!(tool.supports(Platform::Linux));
        assert!(!tool.supports(Platform::Windows));
    }

    #[test]
    fn install_type_serializes_lowercase() {
        let json = serde_json::to_string(&InstallType::System).unwrap();
        assert_eq!(json, "\"system\"");
    }

    #[test]
    fn parse_size_handles_units() {
        assert_eq!(parse_size_mb("2.1MB"), Some(2.1));
        assert_eq!(parse_size_mb("512KB"), Some(0.5));
        assert_eq!(parse_size_mb("1GB"), Some(1024.0));
        assert_eq!(parse_size_mb("lots"), None);
    }

    #[test]
    fn install_spec_size_mb() {
        let mut spec = InstallSpec::new("npm install -g jq", "jq --version");
        assert_eq!(spec.size_mb(), None);
        spec.size = Some("3.2MB".to_string());
        assert_eq!(spec.size_mb(), Some(3.2));
    }
}
