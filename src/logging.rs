use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::Result;

/// Environment variable holding the log filter, e.g. `TAPR_LOG=tapr=trace`
pub const LOG_ENV: &str = "TAPR_LOG";
pub const LOG_FILE: &str = "tapr.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a file-backed subscriber. Keep the guard alive until exit so the
/// background writer flushes.
pub fn init(dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    // a second init (tests, re-entry) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_creates_log_dir() {
        let dir = tempdir().unwrap();
        let log_dir = dir.path().join("state").join("tapr");

        let guard = init(&log_dir).unwrap();
        tracing::info!("hello from the log test");
        drop(guard);

        assert!(log_dir.is_dir());
    }
}
