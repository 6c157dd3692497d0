//! Library integration tests.

use std::sync::Arc;
use std::time::Duration;

use arsenal::catalog::{Catalog, Platform, ToolFilter};
use arsenal::install::{InstallSummary, Installer};
use arsenal::shell::{CommandOutcome, MockRunner};
use arsenal::verify::{run_batch, summarize, BatchOptions, ProbeStatus, Prober};
use arsenal::ArsenalError;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

#[test]
fn error_types_are_public() {
    let err = ArsenalError::UnknownTool {
        name: "test".into(),
    };
    assert!(err.to_string().contains("test"));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn cli_types_are_public() {
    use arsenal::cli::{Cli, Commands};
    use clap::Parser;

    let cli = Cli::parse_from(["arsenal", "--critical-only", "verify", "--json"]);
    assert!(cli.critical_only);

    if let Some(Commands::Verify(args)) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Verify command");
    }
}

#[test]
fn batch_probe_keeps_order_and_bounds_concurrency() {
    let catalog = Catalog::builtin().unwrap();
    let tools = ToolFilter {
        critical_only: true,
        category: None,
    }
    .apply(&catalog)
    .unwrap();

    let runner = Arc::new(MockRunner::new());
    runner.respond("prettier --version", CommandOutcome::exited(0, "3.3.3\n", ""));
    runner.respond("serve --version", CommandOutcome::exited(0, "14.2.1\n", ""));
    for name in ["ni", "rimraf", "nodemon"] {
        runner.delay(&format!("{} --version", name), Duration::from_millis(10));
    }
    let prober = Prober::new(runner.clone()).with_platform(Platform::Linux);
    let options = BatchOptions {
        concurrency: 2,
        pause: Duration::ZERO,
    };

    let results = runtime().block_on(run_batch(&prober, &tools, &options));

    let names: Vec<_> = results.iter().map(|r| r.name()).collect();
    assert_eq!(names, ["ni", "rimraf", "serve", "nodemon", "prettier"]);
    assert!(runner.max_in_flight() <= 2);

    let summary = summarize(&results);
    assert_eq!(summary.verified, 2);
    assert_eq!(summary.failed, 3);
    assert_eq!(summary.success_rate_percent, 40);
    assert_eq!(results[4].status, ProbeStatus::Verified);
    assert_eq!(results[4].version.as_deref(), Some("3.3.3"));
}

#[test]
fn installer_retries_then_reports() {
    let catalog = Catalog::builtin().unwrap();
    let tools = vec![catalog.get("rimraf").unwrap(), catalog.get("jq").unwrap()];

    let runner = Arc::new(MockRunner::new());
    runner.queue(
        "npm install -g rimraf",
        vec![
            CommandOutcome::exited(1, "", "ETIMEDOUT"),
            CommandOutcome::exited(0, "", ""),
        ],
    );
    runner.queue(
        "rimraf --version",
        vec![
            CommandOutcome::exited(127, "", "not found"),
            CommandOutcome::exited(0, "6.0.1", ""),
        ],
    );
    let installer = Installer::new(runner.clone()).with_backoff(Duration::ZERO);

    let outcomes = runtime().block_on(installer.install_all(&tools));

    assert!(outcomes[0].success);
    assert_eq!(outcomes[0].attempts, 2);
    assert!(!outcomes[1].success);

    let summary = InstallSummary::from_outcomes(&outcomes);
    assert_eq!(summary.installed, 1);
    assert_eq!(summary.failed, 1);
    assert!(!summary.all_succeeded());
}
