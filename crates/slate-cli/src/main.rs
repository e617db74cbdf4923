#![forbid(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use slate_cli::tui;
use slate_core::config::{self, UserConfig};
use slate_core::{ErrorCode, TaskStore};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "slate: flat-file to-do list with a terminal interface",
    long_about = None
)]
struct Cli {
    /// Path of the tasks file (overrides config and the platform default).
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("SLATE_LOG").unwrap_or_else(|_| {
        // Default quiet: stderr shares the screen with the TUI.
        EnvFilter::new(if verbose { "slate=debug,warn" } else { "slate=error" })
    });

    let format = env::var("SLATE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

/// Resolution order: `--file` flag, then the config override, then the
/// platform default.
fn resolve_tasks_file(flag: Option<PathBuf>, config: &UserConfig) -> PathBuf {
    flag.or_else(|| config.storage.file.clone())
        .unwrap_or_else(config::default_tasks_file)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config::load_user_config().with_context(|| {
        let code = ErrorCode::ConfigParseError;
        format!("{} {}", code, code.message())
    })?;

    let path = resolve_tasks_file(cli.file, &config);
    info!("tasks file: {}", path.display());

    let store = TaskStore::open(&path);
    tui::run(store)
}
