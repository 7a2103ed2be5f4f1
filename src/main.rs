use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::{Arc, Mutex},
};

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    error::AppError,
    gateway::{Gateway, MemoryGateway, RestGateway},
    store::{Store, Theme},
};

mod category;
mod config;
mod error;
mod form;
mod format;
mod gateway;
mod post;
mod store;
mod tui;
mod vote;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to configuration file.
    #[arg(long, default_value = ".postboard.yml")]
    config: PathBuf,

    /// Browse built-in sample posts instead of the remote backend.
    #[arg(long)]
    demo: bool,

    /// Start with the light theme.
    #[arg(long)]
    light: bool,

    /// Where to write logs. Overrides `log_file` from the config.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<(), AppError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(AppError::LogFile)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("postboard=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let Args {
        config,
        demo,
        light,
        log_file,
    } = Args::parse();

    let cfg = match Config::load(&config, demo) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let log_file = log_file.unwrap_or_else(|| cfg.log_file.clone());
    if let Err(e) = init_logging(&log_file) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let gateway: Arc<dyn Gateway> = if demo {
        info!("using in-memory sample posts");
        Arc::new(MemoryGateway::with_sample_posts())
    } else {
        if let Err(e) = cfg.require_remote() {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
        info!(url = %cfg.url, table = %cfg.table, "using remote backend");
        Arc::new(RestGateway::new(&cfg.url, cfg.key, cfg.table))
    };

    let theme = if light { Theme::Light } else { Theme::Dark };
    match tui::run(gateway, Store::new(theme)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "terminal session failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
