//! Error handling utilities

use crate::error::EngineError;
use tracing::error;

pub const EXIT_GENERAL_ERROR: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Exit code for a top-level error
///
/// Configuration problems map to `2`, everything else to `1`.
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<EngineError>() {
        Some(EngineError::InvalidConfig { .. } | EngineError::Toml(_)) => EXIT_CONFIG_ERROR,
        _ => EXIT_GENERAL_ERROR,
    }
}

/// Report a fatal error and exit
///
/// With `verbose >= 1` the full error chain is printed as well.
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);
    eprintln!("Error: {error}");

    if verbose >= 1 {
        eprintln!("\nError chain:");
        for (i, cause) in error.chain().enumerate() {
            eprintln!("  {}: {}", i, cause);
        }
    }

    std::process::exit(exit_code_for(&error))
}
