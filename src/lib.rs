//! Tierlog - Level-based file logger
//!
//! Appends formatted messages to one file per log level, rotates a file once it
//! grows past a size threshold, and reads entries back filtered by level and date.

pub mod config;
pub mod error;
pub mod level;
pub mod logging;

pub use config::LoggerConfig;
pub use error::{LogError, Result};
pub use level::LogLevel;
pub use logging::{init_tracing, Logger};
