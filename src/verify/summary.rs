//! Aggregation over a finished batch.
//!
//! Everything here is a pure function of the result list; statistics are
//! recomputed on demand rather than accumulated while probing.

use super::result::{ProbeResult, ProbeStatus};
use std::time::Duration;

/// Counts and rates for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub verified: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Verified share of the applicable (non-skipped) tools, rounded.
    /// Zero when every tool was skipped.
    pub success_rate_percent: u32,
    /// Sum of per-probe durations.
    pub elapsed_total: Duration,
}

/// Tools sharing a category, in run order.
#[derive(Debug, Clone)]
pub struct CategoryGroup<'r, 'a> {
    pub category: &'a str,
    pub results: Vec<&'r ProbeResult<'a>>,
}

/// Compute summary statistics.
pub fn summarize(results: &[ProbeResult<'_>]) -> BatchSummary {
    let count = |status: ProbeStatus| results.iter().filter(|r| r.status == status).count();

    let total = results.len();
    let verified = count(ProbeStatus::Verified);
    let failed = count(ProbeStatus::Failed);
    let skipped = count(ProbeStatus::Skipped);

    BatchSummary {
        total,
        verified,
        failed,
        skipped,
        success_rate_percent: percent(verified, total - skipped),
        elapsed_total: results.iter().map(|r| r.elapsed).sum(),
    }
}

/// Rounded percentage, zero when the denominator is zero.
pub fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

/// Group results by category, categories in first-seen order.
pub fn group_by_category<'r, 'a>(results: &'r [ProbeResult<'a>]) -> Vec<CategoryGroup<'r, 'a>> {
    let mut groups: Vec<CategoryGroup<'r, 'a>> = Vec::new();

    for result in results {
        let category = result.descriptor.category.as_str();
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.results.push(result),
            None => groups.push(CategoryGroup {
                category,
                results: vec![result],
            }),
        }
    }

    groups
}

/// Whether any critical tool failed.
pub fn has_blocking_failure(results: &[ProbeResult<'_>]) -> bool {
    results.iter().any(ProbeResult::is_blocking)
}

/// All failed results, in run order.
pub fn failed_results<'r, 'a>(results: &'r [ProbeResult<'a>]) -> Vec<&'r ProbeResult<'a>> {
    results.iter().filter(|r| r.is_failed()).collect()
}

/// Failed results for critical tools, in run order.
pub fn critical_failures<'r, 'a>(results: &'r [ProbeResult<'a>]) -> Vec<&'r ProbeResult<'a>> {
    results.iter().filter(|r| r.is_blocking()).collect()
}
