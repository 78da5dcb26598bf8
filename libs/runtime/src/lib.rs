//! Process-level runtime for the gateway server: layered configuration
//! loading and logging initialization.

pub mod config;
pub mod logging;

pub use config::{AppConfig, CliArgs, GatewaySection, LoggingConfig, ServerConfig};
