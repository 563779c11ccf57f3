use crate::storage::StoreError;
use crate::upload::GatewayError;
use crate::wallet::ProviderError;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} wallet not installed")]
    WalletNotInstalled(String),

    #[error("{wallet} wallet error: {source}")]
    WalletProvider {
        wallet: String,
        #[source]
        source: ProviderError,
    },

    #[error("Unsupported wallet type: {0}")]
    UnsupportedWalletType(String),

    #[error("Upload of block {slice}/{total} failed: {detail}")]
    UploadTransport {
        slice: usize,
        total: usize,
        detail: String,
    },

    /// The existence check could not be answered. Distinct from an empty result.
    #[error("Existence check failed: {0}")]
    DedupQuery(#[source] GatewayError),

    #[error("Another upload is already in progress")]
    UploadInProgress,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}
