//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, fixed bucket tables)
//! - Library configuration and CLI option parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, Opt};
