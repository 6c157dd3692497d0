//! Arsenal CLI entry point.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use arsenal::catalog::ToolFilter;
use arsenal::cli::{Cli, CommandContext, CommandDispatcher, Commands};
use arsenal::config::{load_config, ConfigPaths, Settings};
use arsenal::shell::is_ci;
use arsenal::ui::{create_ui, OutputMode, UserInterface};
use arsenal::ArsenalError;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Console log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// When file logging is enabled, INFO and above are also appended to the
/// log file. A log file that cannot be opened is ignored.
fn init_tracing(debug: bool, settings: &Settings) {
    let console_filter = if debug {
        EnvFilter::new("arsenal=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("arsenal=warn"))
    };

    let file_layer = settings
        .logging
        .then(|| settings.log_file_path())
        .and_then(|path| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        })
        .map(|file| {
            let level = if debug { "arsenal=debug" } else { "arsenal=info" };
            fmt::layer()
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .with_filter(EnvFilter::new(level))
        });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .with(file_layer)
        .init();
}

/// Files the configuration is read from, in merge order.
fn config_sources(project_root: &Path, config_file: Option<&Path>) -> Vec<PathBuf> {
    match config_file {
        Some(path) => vec![path.to_path_buf()],
        None => ConfigPaths::discover(project_root)
            .all_existing()
            .into_iter()
            .cloned()
            .collect(),
    }
}

fn report_error(ui: &mut dyn UserInterface, error: &ArsenalError) -> ExitCode {
    ui.error(&format!("Error: {}", error));
    if let ArsenalError::UnknownCategory { available, .. } = error {
        ui.hint(&format!("Available categories: {}", available.join(", ")));
    }
    exit_code(error.exit_code())
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    // JSON output must stay machine-readable
    let json = matches!(&cli.command, Some(Commands::Verify(args)) if args.json);
    let output_mode = if json {
        OutputMode::Quiet
    } else {
        OutputMode::from_flags(cli.verbose, cli.quiet)
    };
    let mut ui = create_ui(!is_ci(), output_mode);

    let project_root = std::env::current_dir().unwrap_or_default();
    let config = match load_config(&project_root, cli.config_file.as_deref()) {
        Ok(config) => config,
        Err(e) => return report_error(ui.as_mut(), &e),
    };

    init_tracing(cli.debug, &config.settings);
    tracing::debug!("arsenal starting with args: {:?}", cli);

    let sources = config_sources(&project_root, cli.config_file.as_deref());
    let context = match CommandContext::new(config) {
        Ok(context) => context
            .with_config_sources(sources)
            .with_filter(ToolFilter {
                critical_only: cli.critical_only,
                category: cli.category.clone(),
            }),
        Err(e) => return report_error(ui.as_mut(), &e),
    };

    let dispatcher = CommandDispatcher::new(context);
    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => exit_code(result.exit_code),
        Err(e) => {
            tracing::error!("{}", e);
            report_error(ui.as_mut(), &e)
        }
    }
}
