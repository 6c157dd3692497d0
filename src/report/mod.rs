//! Verification report and installation suggestions.

pub mod json;
pub mod suggestions;

pub use json::{ReportEntry, ReportStatistics, SystemInfo, VerificationReport, NPM_NOT_FOUND};
pub use suggestions::{InstallSuggestions, MissingCritical, SuggestionSection};
