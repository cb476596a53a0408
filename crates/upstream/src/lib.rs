pub mod catalog;
pub mod client;
pub mod config;
pub mod provider;
pub mod shape;

use cinedex_core::pagination::PageError;
use thiserror::Error;

/// Failure of the single outbound attempt to the provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("upstream request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("upstream body is not JSON: {0}")]
    Decode(String),
}

/// Dispatch-level failure for a catalog operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Validation(#[from] PageError),
    #[error("invalid title identifier: {0:?}")]
    InvalidIdentifier(String),
}
