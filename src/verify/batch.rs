//! Concurrency-bounded batch scheduling of probes.
//!
//! Descriptors are split into consecutive groups of `concurrency` entries.
//! All probes in a group run concurrently; the next group starts only after
//! the whole group has finished and the inter-group pause has elapsed.
//! Results come back index-aligned with the input.

use super::probe::Prober;
use super::result::ProbeResult;
use crate::catalog::ToolDescriptor;
use futures_util::future::join_all;
use std::time::Duration;

/// Scheduling knobs for a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Probes per group. Zero is treated as one.
    pub concurrency: usize,
    /// Pause after every group except the last.
    pub pause: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            concurrency: 5,
            pause: Duration::from_millis(100),
        }
    }
}

impl BatchOptions {
    fn width(&self) -> usize {
        self.concurrency.max(1)
    }
}

/// Announcement that a group is about to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// One-based group number.
    pub group: usize,
    /// Number of groups in the run.
    pub groups: usize,
    /// Index of the first descriptor in this group.
    pub start: usize,
    /// One past the index of the last descriptor in this group.
    pub end: usize,
    /// Number of descriptors in the run.
    pub total: usize,
}

/// Probe every descriptor, `options.concurrency` at a time.
pub async fn run_batch<'a>(
    prober: &Prober,
    descriptors: &[&'a ToolDescriptor],
    options: &BatchOptions,
) -> Vec<ProbeResult<'a>> {
    run_batch_with_progress(prober, descriptors, options, |_| {}).await
}

/// Like [`run_batch`], calling `on_group` before each group starts.
pub async fn run_batch_with_progress<'a, F>(
    prober: &Prober,
    descriptors: &[&'a ToolDescriptor],
    options: &BatchOptions,
    mut on_group: F,
) -> Vec<ProbeResult<'a>>
where
    F: FnMut(BatchProgress),
{
    let width = options.width();
    let total = descriptors.len();
    let groups = total.div_ceil(width);
    let mut results = Vec::with_capacity(total);

    tracing::info!("Probing {} tools in {} groups of up to {}", total, groups, width);

    for (index, group) in descriptors.chunks(width).enumerate() {
        let start = index * width;
        on_group(BatchProgress {
            group: index + 1,
            groups,
            start,
            end: start + group.len(),
            total,
        });

        let probes = group.iter().map(|&descriptor| prober.probe(descriptor));
        results.extend(join_all(probes).await);

        if index + 1 < groups && !options.pause.is_zero() {
            tokio::time::sleep(options.pause).await;
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{InstallType, Platform};
    use crate::shell::{CommandOutcome, MockRunner};
    use std::sync::Arc;
    use std::time::Instant;

    fn tools(count: usize) -> Vec<ToolDescriptor> {
        (0..count)
            .map(|i| ToolDescriptor {
                name: format!("tool-{}", i),
                probe_command: format!("tool-{} --version", i),
                category: "Testing".to_string(),
                description: String::new(),
                package_name: format!("tool-{}", i),
                install_type: InstallType::Npm,
                platforms: Platform::ALL.to_vec(),
                critical: false,
                install: None,
            })
            .collect()
    }

    fn options(concurrency: usize) -> BatchOptions {
        BatchOptions {
            concurrency,
            pause: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn results_are_index_aligned() {
        for n in [0, 1, 4, 5, 6, 13] {
            for k in [0, 1, 2, 5, 7, 20] {
                let owned = tools(n);
                let descriptors: Vec<&ToolDescriptor> = owned.iter().collect();
                let runner = Arc::new(MockRunner::new());
                let prober = Prober::new(runner).with_platform(Platform::Linux);

                let results = run_batch(&prober, &descriptors, &options(k)).await;

                assert_eq!(results.len(), n);
                for (i, result) in results.iter().enumerate() {
                    assert_eq!(result.name(), format!("tool-{}", i), "n={} k={}", n, k);
                }
            }
        }
    }

    #[tokio::test]
    async fn group_width_bounds_concurrency() {
        let owned = tools(12);
        let descriptors: Vec<&ToolDescriptor> = owned.iter().collect();
        let runner = Arc::new(MockRunner::new());
        for tool in &owned {
            runner.delay(&tool.probe_command, Duration::from_millis(20));
            runner.respond(&tool.probe_command, CommandOutcome::exited(0, "1.0.0", ""));
        }
        let prober = Prober::new(runner.clone()).with_platform(Platform::Linux);

        let results = run_batch(&prober, &descriptors, &options(4)).await;

        assert!(results.iter().all(|r| r.is_verified()));
        assert!(runner.max_in_flight() <= 4);
        assert!(runner.max_in_flight() >= 2);
    }

    #[tokio::test]
    async fn progress_announces_each_group() {
        let owned = tools(7);
        let descriptors: Vec<&ToolDescriptor> = owned.iter().collect();
        let prober = Prober::new(Arc::new(MockRunner::new())).with_platform(Platform::Linux);

        let mut seen = Vec::new();
        run_batch_with_progress(&prober, &descriptors, &options(3), |p| seen.push(p)).await;

        let ranges: Vec<_> = seen.iter().map(|p| (p.group, p.start, p.end)).collect();
        assert_eq!(ranges, vec![(1, 0, 3), (2, 3, 6), (3, 6, 7)]);
        assert!(seen.iter().all(|p| p.groups == 3 && p.total == 7));
    }

    #[tokio::test]
    async fn pause_applies_between_groups_only() {
        let owned = tools(3);
        let descriptors: Vec<&ToolDescriptor> = owned.iter().collect();
        let prober = Prober::new(Arc::new(MockRunner::new())).with_platform(Platform::Linux);
        let opts = BatchOptions {
            concurrency: 1,
            pause: Duration::from_millis(30),
        };

        let start = Instant::now();
        run_batch(&prober, &descriptors, &opts).await;

        // Two pauses for three groups.
        assert!(start.elapsed() >= Duration::from_millis(60));
    }

    #[tokio::test]
    async fn skipped_tools_keep_their_slot() {
        let mut owned = tools(3);
        owned[1].platforms = vec![Platform::Windows];
        let descriptors: Vec<&ToolDescriptor> = owned.iter().collect();
        let prober = Prober::new(Arc::new(MockRunner::new())).with_platform(Platform::Linux);

        let results = run_batch(&prober, &descriptors, &options(5)).await;

        assert!(results[0].is_failed());
        assert!(results[1].is_skipped());
        assert!(results[2].is_failed());
    }
}
