//! Installation suggestions for tools that failed verification.
//!
//! Failed tools are grouped by how they are normally installed. npm tools
//! collapse into a single `npm install -g` line, system tools get the
//! platform's package manager commands, and curl tools get their vendor
//! install script.

use crate::catalog::{curl_install_command, InstallType, Platform};
use crate::verify::ProbeResult;

/// One block of suggested commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionSection {
    pub install_type: InstallType,
    pub title: &'static str,
    /// Shell lines; lines starting with `#` are comments.
    pub lines: Vec<String>,
}

/// A critical tool that failed verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingCritical {
    pub name: String,
    pub description: String,
}

/// Everything needed to tell the user how to fix a failed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallSuggestions {
    pub sections: Vec<SuggestionSection>,
    pub critical_missing: Vec<MissingCritical>,
}

impl InstallSuggestions {
    /// Build suggestions for the failed results among `results`.
    pub fn from_results(results: &[ProbeResult<'_>], platform: Platform) -> Self {
        let failed: Vec<_> = results.iter().filter(|r| r.is_failed()).collect();
        let packages = |kind: InstallType| -> Vec<&str> {
            failed
                .iter()
                .filter(|r| r.descriptor.install_type == kind)
                .map(|r| r.descriptor.package_name.as_str())
                .collect()
        };

        let mut sections = Vec::new();

        let npm = packages(InstallType::Npm);
        if !npm.is_empty() {
            sections.push(SuggestionSection {
                install_type: InstallType::Npm,
                title: "NPM packages",
                lines: vec![format!("npm install -g {}", npm.join(" "))],
            });
        }

        let system = packages(InstallType::System);
        if !system.is_empty() {
            sections.push(SuggestionSection {
                install_type: InstallType::System,
                title: "System packages",
                lines: system_lines(&system, platform),
            });
        }

        let curl_lines: Vec<String> = failed
            .iter()
            .filter(|r| r.descriptor.install_type == InstallType::Curl)
            .flat_map(|r| curl_lines(&r.descriptor.name, platform))
            .collect();
        if !curl_lines.is_empty() {
            sections.push(SuggestionSection {
                install_type: InstallType::Curl,
                title: "Special installations",
                lines: curl_lines,
            });
        }

        let critical_missing = failed
            .iter()
            .filter(|r| r.descriptor.critical)
            .map(|r| MissingCritical {
                name: r.descriptor.name.clone(),
                description: r.descriptor.description.clone(),
            })
            .collect();

        Self {
            sections,
            critical_missing,
        }
    }

    /// Nothing failed, so there is nothing to suggest.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.critical_missing.is_empty()
    }
}

fn system_lines(packages: &[&str], platform: Platform) -> Vec<String> {
    let joined = packages.join(" ");
    match platform {
        Platform::MacOS => vec![
            "# macOS (using Homebrew):".to_string(),
            format!("brew install {}", joined),
        ],
        Platform::Linux => vec![
            "# Ubuntu/Debian:".to_string(),
            format!("sudo apt install {}", joined),
            "# RHEL/CentOS/Fedora:".to_string(),
            format!("sudo dnf install {}", joined),
        ],
        Platform::Windows => std::iter::once("# Windows (using Scoop):".to_string())
            .chain(packages.iter().map(|p| format!("scoop install {}", p)))
            .collect(),
    }
}

fn curl_lines(name: &str, platform: Platform) -> Vec<String> {
    let label = match name {
        "bun" => "Bun",
        "volta" => "Volta",
        _ => return Vec::new(),
    };

    let command = match (name, curl_install_command(name, platform)) {
        (_, Some(command)) => command.to_string(),
        ("volta", None) => "# Download installer from: https://volta.sh".to_string(),
        _ => return Vec::new(),
    };

    vec![format!("# Install {}:", label), command]
}
