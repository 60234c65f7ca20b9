//! Application initialization.
//!
//! Currently only the logger needs process-wide setup.

mod logger;

// Re-export public API
pub use logger::init_logger_with;
