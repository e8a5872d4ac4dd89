//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (database path, pool limits)
//! - Library configuration and log option types
//! - CLI parsing types

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{Cli, Command};
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
