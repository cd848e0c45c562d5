//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Cart persistence settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// File the cart is persisted to between runs
    #[arg(
        long,
        env = "CART_FILE",
        default_value = ".salon-booking/cart.json",
        global = true
    )]
    pub cart_file: PathBuf,
}
