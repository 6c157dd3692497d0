//! Version string extraction from probe output.

use regex::Regex;
use std::sync::LazyLock;

/// Longest version string kept in a result.
pub const MAX_VERSION_LEN: usize = 50;

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+\.\d+(?:\.\d+)?").expect("valid version regex"));

/// Extract a version from a verified probe's output.
///
/// Looks at stdout, or stderr when stdout is blank. Prefers the first
/// dotted version number; falls back to the first line of the trimmed
/// output. The result is cut to [`MAX_VERSION_LEN`] characters. Blank
/// output yields `None`.
pub fn extract_version(stdout: &str, stderr: &str) -> Option<String> {
    let output = if stdout.trim().is_empty() { stderr } else { stdout };
    let output = output.trim();
    if output.is_empty() {
        return None;
    }

    let raw = match VERSION_RE.find(output) {
        Some(m) => m.as_str(),
        None => output.lines().next().unwrap_or(output).trim(),
    };

    Some(raw.chars().take(MAX_VERSION_LEN).collect())
}
