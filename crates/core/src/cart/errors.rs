//! Cart errors.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors raised by cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The service price could not be read as a non-negative decimal.
    #[error("invalid price {0:?}")]
    InvalidPrice(String),

    /// The quantity was not a whole number in range.
    #[error("invalid quantity {0:?}")]
    InvalidQuantity(String),

    /// The durable store rejected a read or write.
    #[error("failed to persist cart")]
    Storage(#[from] StorageError),
}

impl From<serde_json::Error> for CartError {
    fn from(error: serde_json::Error) -> Self {
        Self::Storage(StorageError::Encoding(error))
    }
}
