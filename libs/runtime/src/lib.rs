//! Process-level plumbing shared by binaries: layered configuration,
//! logging initialisation and home directory resolution.

pub mod config;
pub mod logging;
pub mod paths;

pub use config::{AppConfig, CliArgs, LoggingConfig, Section};
