//! Logging configuration and initialization

use crate::app::config::AppConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Initialize tracing for the application
///
/// `RUST_LOG` takes precedence over the verbosity-derived level. Logs go to
/// stderr so results on stdout stay machine-readable.
pub fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));

    let initialized = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(config.verbose >= 2) // Show target module for -vv and above
        .with_thread_names(config.verbose >= 3) // Show worker names for -vvv
        .with_line_number(config.verbose >= 3)
        .try_init();

    if initialized.is_ok() {
        debug!("Logging initialized at verbosity {}", config.verbose);
    }
}
