//! Logging utilities for VenueGrid.
//!
//! Every crate logs through `tracing` macros; this module only installs the
//! subscriber. Call one of the `init*` functions once at start-up.

use tracing::{error, info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use venuegrid_config::LoggingConfig;

const LOG_FILE_PREFIX: &str = "venuegrid.log";

/// Initialize the tracing subscriber at INFO.
///
/// # Examples
///
/// ```
/// use venuegrid_common::logging;
///
/// logging::init();
/// // A second call is a no-op.
/// logging::init_with_level(tracing::Level::DEBUG);
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific level for the
/// `venuegrid*` targets. `RUST_LOG` still applies to everything else.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::from_default_env();
    let filter = match format!("venuegrid={}", level.as_str().to_lowercase()).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };

    // try_init: a global subscriber may already be set (tests, repeated init)
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Initialize the subscriber from the `[logging]` config section.
///
/// `RUST_LOG` wins over `config.level`. When `config.directory` is set, logs
/// are additionally written to a daily rolling file there; the returned guard
/// must be held for the lifetime of the process or buffered lines are lost.
pub fn init_from_config(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match config.directory.as_deref() {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_line_number(true))
        .with(file_layer)
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!(
            "Logging initialized (level: {}, directory: {})",
            config.level,
            config.directory.as_deref().unwrap_or("-")
        );
    }
    guard
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the original result, allowing this function to be used in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => log_error(e, error_context),
    }
    result
}
