//! Tool verification engine.
//!
//! - [`probe`] runs one version-check command and classifies the outcome
//! - [`batch`] schedules probes in concurrency-bounded groups
//! - [`summary`] aggregates results into statistics and groups
//! - [`version`] pulls version strings out of probe output

pub mod batch;
pub mod probe;
pub mod result;
pub mod summary;
pub mod version;

pub use batch::{run_batch, run_batch_with_progress, BatchOptions, BatchProgress};
pub use probe::{Prober, DEFAULT_PROBE_TIMEOUT};
pub use result::{
    ProbeResult, ProbeStatus, DETAIL_COMMAND_FAILED, DETAIL_SPAWN_FAILED, DETAIL_TIMEOUT,
};
pub use summary::{
    critical_failures, failed_results, group_by_category, has_blocking_failure, percent,
    summarize, BatchSummary, CategoryGroup,
};
pub use version::{extract_version, MAX_VERSION_LEN};
