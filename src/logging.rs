//! Logging setup.
//!
//! The terminal belongs to the TUI, so tracing output goes to a daily rolling
//! file under `.logs/` instead of stdout.

use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const LOG_DIR: &str = ".logs";

// Flushes buffered log lines on drop; must live as long as the process.
static WRITER_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Set up tracing with a non-blocking daily-rolling file writer.
///
/// Files land at `.logs/melodeon.<date>.log`. The default filter is DEBUG for
/// this crate and WARN for everything else; `RUST_LOG` overrides it.
pub fn init_logging() -> anyhow::Result<()> {
    std::fs::create_dir_all(LOG_DIR)?;

    let appender = rolling::daily(LOG_DIR, "melodeon");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = WRITER_GUARD.set(guard);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("melodeon=debug,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE),
        )
        .init();

    tracing::info!(dir = LOG_DIR, "Logging initialized");
    Ok(())
}
