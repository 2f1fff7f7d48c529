use std::env;
use std::io;
use tracing_appender::rolling;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Default stdout filter, overridden by `RUST_LOG` when set.
pub const STDOUT_FILTER: &str = "info,engine=info,web_request=info";

/// Filter for the rolling log file.
pub const FILE_FILTER: &str = "info,engine=debug,web_request=debug";

pub fn configure_logging() {
    // Stdout log configuration
    let stdout_filter = env::var("RUST_LOG").unwrap_or_else(|_| STDOUT_FILTER.to_string());
    let stdout_log = fmt::layer()
        .with_writer(io::stdout)
        .with_filter(EnvFilter::new(stdout_filter));

    // File log configuration
    let file_appender = rolling::daily("logs", "app.log");
    let file_log = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_filter(EnvFilter::new(FILE_FILTER));

    tracing_subscriber::Registry::default()
        .with(stdout_log)
        .with(file_log)
        .init();
}

/// Stdout-only logging for command line tools.
pub fn configure_cli_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::Registry::default()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_filter(EnvFilter::new(level)),
        )
        .init();
}
