//! API Config

use std::time::Duration;

use clap::Args;

/// Booking backend settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Base URL of the booking API
    #[arg(
        long,
        env = "API_URL",
        default_value = "http://localhost:5000/api",
        global = true
    )]
    pub api_url: String,

    /// Bearer token sent with every request
    #[arg(long, env = "API_TOKEN", hide_env_values = true, global = true)]
    pub api_token: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, env = "API_TIMEOUT_SECONDS", default_value_t = 10_u64, global = true)]
    pub api_timeout_seconds: u64,
}

impl ApiConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_seconds)
    }
}
