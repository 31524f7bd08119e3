//! Application module
//!
//! This module contains the pieces the command-line front end needs around
//! the engine:
//! - Verbosity handling
//! - Logging setup
//! - Fatal error reporting

pub mod config;
pub mod error_handling;
pub mod logging;

// Re-export main application functions
pub use config::AppConfig;
pub use error_handling::handle_fatal_error;
pub use logging::init_logging;
