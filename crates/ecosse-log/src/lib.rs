//! Logging bootstrap for the surface synthesis tools.
//!
//! Wires up a `tracing` subscriber with a console layer for interactive use
//! and, when a log directory is supplied, a JSON file layer for post-mortem
//! inspection of batch runs. Filtering follows `RUST_LOG` when set and the
//! persisted config's `log_level` otherwise.

use ecosse_config::Config;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// The console layer prints uptime-stamped events with their target module
/// and the worker thread name, so output from the synthesis pool is
/// attributable. Passing `file_log_dir` additionally mirrors events into
/// `<dir>/ecosse.log` as JSON lines; callers typically gate that on debug
/// builds. A file layer that cannot be created is skipped rather than
/// failing the run.
pub fn init_logging(config: Option<&Config>, file_log_dir: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(configured_directive(config)));

    let console = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let file = file_log_dir.and_then(|dir| {
        std::fs::create_dir_all(dir).ok()?;
        let log_file = std::fs::File::create(dir.join("ecosse.log")).ok()?;
        Some(
            fmt::layer()
                .with_writer(log_file)
                .with_ansi(false)
                .with_target(true)
                .with_timer(fmt::time::uptime())
                .json(),
        )
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();
}

/// The filter directive used when `RUST_LOG` is unset: the config's
/// `log_level` if present and non-empty, `info` otherwise.
fn configured_directive(config: Option<&Config>) -> &str {
    config
        .map(|config| config.debug.log_level.as_str())
        .filter(|level| !level.is_empty())
        .unwrap_or("info")
}

/// An `EnvFilter` with the default directive, for tests and tools that
/// bypass [`init_logging`].
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new("info")
}
