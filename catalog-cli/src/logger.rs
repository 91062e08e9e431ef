//! Logging setup
//!
//! Logs go to stderr so command output on stdout stays clean, or to a daily
//! rolling file when a log directory is given.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "catalog_cli=info,catalog_client=warn";

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            "catalog_cli=debug,catalog_client=debug".into()
        } else {
            DEFAULT_FILTER.into()
        }
    })
}

/// Initialize the logger with optional file output
pub fn init_logger(verbose: bool, log_dir: Option<&Path>) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir
        && std::fs::create_dir_all(dir).is_ok()
    {
        let file_appender = tracing_appender::rolling::daily(dir, "catalog-cli");
        subscriber.with_ansi(false).with_writer(file_appender).init();
        return;
    }

    subscriber.with_writer(std::io::stderr).init();
}
