//! Frontend components
//!
//! Configuration loading for facade consumers.

pub mod config;

pub use config::{FacadeConfig, LoggingConfig, Workarounds, CONFIG_FILE_NAME};
