//! File logging. The board owns the terminal, so log lines go to a daily
//! rolling file under the board directory instead of stderr.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding a tracing filter ("debug", "choreboard=trace")
pub const LOG_ENV: &str = "CHOREBOARD_LOG";

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber writing to `logs_dir/choreboard.log.<date>`.
///
/// Returns None when the directory can't be created; logging is then off.
/// The guard must be held for the life of the program so buffered lines
/// are flushed.
pub fn init_logging(logs_dir: &Path, level: Option<&str>) -> Option<WorkerGuard> {
    if std::fs::create_dir_all(logs_dir).is_err() {
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(logs_dir, "choreboard.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::registry().with(build_env_filter(level)).with(
        fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true),
    );

    let _ = tracing::subscriber::set_global_default(subscriber);

    Some(guard)
}

/// Precedence: CLI flag > CHOREBOARD_LOG > "info"
fn build_env_filter(level: Option<&str>) -> EnvFilter {
    level
        .and_then(|level| EnvFilter::try_new(level).ok())
        .or_else(|| EnvFilter::try_from_env(LOG_ENV).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
