// Main entrypoint for the activity directory service.

use activity_directory::app::App;
use activity_directory::config::{Config, ConfigTrait};
use activity_directory::liveness;
use activity_directory::metrics;
use activity_directory::shutdown::GracefulShutdown;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

const CONFIG_PATH: &str = "cfg/activity-directory.cfg.yaml";
const CONFIG_PATH_LOCAL: &str = "cfg/activity-directory.cfg.local.yaml";

/// Activity Directory - sign-ups for school extracurricular activities
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, value_name = "FILE")]
    cfg: Option<PathBuf>,
}

/// Where the configuration came from, reported once logging is up.
enum ConfigSource {
    File(PathBuf),
    Defaults,
}

/// Loads the configuration struct from YAML file.
/// Tries the custom path, then the local config, then the default config,
/// then built-in defaults.
fn load_cfg(path: Option<PathBuf>) -> Result<(Config, ConfigSource)> {
    if let Some(custom_path) = path {
        let cfg = Config::load(&custom_path)
            .with_context(|| format!("failed to load custom config from {:?}", custom_path))?;
        return Ok((cfg, ConfigSource::File(custom_path)));
    }

    for candidate in [CONFIG_PATH_LOCAL, CONFIG_PATH] {
        let candidate = Path::new(candidate);
        if candidate.exists() {
            let cfg = Config::load(candidate)
                .with_context(|| format!("failed to load config from {:?}", candidate))?;
            return Ok((cfg, ConfigSource::File(candidate.to_path_buf())));
        }
    }

    Ok((Config::default(), ConfigSource::Defaults))
}

/// Configures structured logging based on configuration.
fn configure_logger(cfg: &Config) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let log_level = cfg
        .logs()
        .and_then(|logs| logs.level.as_deref())
        .unwrap_or("info");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if cfg.is_prod() {
        // Production: JSON format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        // Development: Pretty console format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .init();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (cfg, source) = load_cfg(args.cfg)?;
    configure_logger(&cfg);

    match &source {
        ConfigSource::File(path) => info!(
            component = "config",
            event = "load_success",
            path = ?path,
            "config loaded"
        ),
        ConfigSource::Defaults => warn!(
            component = "config",
            event = "load_defaults",
            "no config file found, using built-in defaults"
        ),
    }

    // Install the recorder before the runtime starts
    if cfg.metrics_enabled() {
        if let Err(e) = metrics::init_prometheus_exporter() {
            warn!(
                component = "main",
                event = "metrics_init_failed",
                error = %e,
                "metrics endpoint will render nothing"
            );
        }
    }

    tokio::runtime::Runtime::new()
        .context("Failed to create tokio runtime")?
        .block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<()> {
    let shutdown_token = CancellationToken::new();
    let graceful_shutdown = GracefulShutdown::new(shutdown_token.clone(), cfg.shutdown_timeout());

    let probe = Arc::new(liveness::Probe::new(cfg.probe_timeout()));

    let app = App::new(shutdown_token.clone(), cfg, probe).await?;
    let listener = app.bind().await?;
    app.serve(listener, &graceful_shutdown);

    // Listen for OS signals or cancellation and wait for graceful shutdown
    if let Err(e) = graceful_shutdown.await_shutdown().await {
        error!(
            component = "main",
            scope = "service",
            event = "graceful_shutdown_failed",
            error = %e,
            "failed to gracefully shut down service"
        );
        return Err(e);
    }

    Ok(())
}
