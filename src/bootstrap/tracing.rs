//! Tracing configuration for Spark
//!
//! - Human-readable events go to stderr; stdout belongs to command output
//! - A non-blocking file layer writes `<data dir>/logs/spark.log`
//! - A Sentry layer is added when `SENTRY_DSN` is set
//! - `RUST_LOG` overrides the default filter

use std::{fs, io, sync::OnceLock};

use sp_app::app_paths::AppPaths;
use sp_core::ports::AppDirsPort;
use sp_infra::app_dirs::DirsAppDirsAdapter;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static SENTRY_GUARD: OnceLock<sentry::ClientInitGuard> = OnceLock::new();

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Default filter directives
///
/// - **Development**: debug for the app crates
/// - **Production**: info for the app crates
/// - HTTP client internals stay at warn either way
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        // Bare level keeps third-party crates quiet in production
        if is_dev { "info" } else { "warn" }.to_string(),
        format!("spark={level}"),
        format!("sp_app={level}"),
        format!("sp_core={level}"),
        format!("sp_infra={level}"),
        "reqwest=warn".to_string(),
        "hyper=warn".to_string(),
        "hyper_util=warn".to_string(),
    ]
}

/// Initialize the global tracing subscriber
///
/// Call once, before any command runs. Returns `Err` if a subscriber is
/// already registered.
pub fn init_tracing_subscriber() -> anyhow::Result<()> {
    let is_dev = is_development();

    let filter_directives = build_filter_directives(is_dev);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    // Guard must outlive the subscriber
    let sentry_layer = if let Ok(dsn) = std::env::var("SENTRY_DSN") {
        let guard = sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                traces_sample_rate: 1.0,
                ..Default::default()
            },
        ));

        if SENTRY_GUARD.set(guard).is_err() {
            eprintln!("Sentry guard already initialized");
        }

        Some(sentry_tracing::layer())
    } else {
        None
    };

    let stderr_writer: BoxMakeWriter = BoxMakeWriter::new(io::stderr);
    let file_writer = match build_file_writer() {
        Ok(writer) => Some(writer),
        Err(err) => {
            eprintln!("Failed to initialize file logging, continuing with stderr only: {err}");
            None
        }
    };

    // "2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message"
    let stderr_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIME_FORMAT.to_string()))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(stderr_writer);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(TIME_FORMAT.to_string()))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    let subscriber = registry()
        .with(env_filter)
        .with(sentry_layer)
        .with(stderr_layer);

    if let Some(layer) = file_layer {
        subscriber.with(layer).try_init()?;
    } else {
        subscriber.try_init()?;
    }

    Ok(())
}

fn build_file_writer() -> anyhow::Result<NonBlocking> {
    let app_dirs = DirsAppDirsAdapter::from_env().get_app_dirs()?;
    let paths = AppPaths::from_app_dirs(&app_dirs);
    fs::create_dir_all(&paths.logs_dir)?;

    let file_appender = tracing_appender::rolling::never(&paths.logs_dir, "spark.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}
