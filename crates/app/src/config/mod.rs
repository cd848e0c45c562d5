//! Application configuration

use clap::Args;

use crate::config::{api::ApiConfig, observability::LoggingConfig, storage::StorageConfig};

pub mod api;
pub mod observability;
pub mod storage;

pub use observability::LogFormat;

/// Settings shared by every command.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Booking backend settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Cart persistence settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
