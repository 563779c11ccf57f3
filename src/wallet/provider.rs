use super::WalletType;
use crate::config::WalletFixture;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider threw, including the user declining the request.
    #[error("{0}")]
    Rejected(String),

    /// The page context could not run the call or returned an unreadable result.
    #[error("Page script failed: {0}")]
    Script(String),
}

/// Capability interface over the wallet providers injected into a page.
///
/// Implementations run each call inside the page context and hand back plain
/// values; the bridge never builds executable code itself.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Is this wallet's provider present in the page?
    async fn probe(&self, wallet: WalletType) -> Result<bool, ProviderError>;

    /// Request account access and return the connected address.
    async fn connect(&self, wallet: WalletType) -> Result<String, ProviderError>;

    async fn disconnect(&self, wallet: WalletType) -> Result<(), ProviderError>;
}

/// Normalized reply of a page-context connect call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConnectReply {
    pub fn ok(address: impl Into<String>) -> Self {
        Self {
            success: true,
            address: Some(address.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            address: None,
            error: Some(error.into()),
        }
    }

    pub fn into_result(self) -> Result<String, ProviderError> {
        match (self.success, self.address, self.error) {
            (true, Some(address), _) if !address.is_empty() => Ok(address),
            (true, _, _) => Err(ProviderError::Script(
                "provider returned no address".to_string(),
            )),
            (false, _, error) => Err(ProviderError::Rejected(
                error.unwrap_or_else(|| "Failed to connect wallet".to_string()),
            )),
        }
    }
}

/// Provider backed by the `[wallets.*]` tables of the config file.
///
/// Used by the CLI host when no browser page is attached: a wallet listed in
/// the config is reported as installed and connects to its configured address.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredProvider {
    wallets: HashMap<WalletType, WalletFixture>,
}

impl ConfiguredProvider {
    pub fn new(wallets: HashMap<WalletType, WalletFixture>) -> Self {
        Self { wallets }
    }

    fn reply(&self, wallet: WalletType) -> ConnectReply {
        match self.wallets.get(&wallet) {
            Some(WalletFixture {
                reject: Some(reason),
                ..
            }) => ConnectReply::failed(reason.clone()),
            Some(fixture) => ConnectReply::ok(fixture.address.clone()),
            None => ConnectReply::failed(format!("{} provider missing", wallet)),
        }
    }
}

#[async_trait]
impl WalletProvider for ConfiguredProvider {
    async fn probe(&self, wallet: WalletType) -> Result<bool, ProviderError> {
        Ok(self.wallets.contains_key(&wallet))
    }

    async fn connect(&self, wallet: WalletType) -> Result<String, ProviderError> {
        self.reply(wallet).into_result()
    }

    async fn disconnect(&self, wallet: WalletType) -> Result<(), ProviderError> {
        if self.wallets.contains_key(&wallet) {
            Ok(())
        } else {
            Err(ProviderError::Script(format!("{} provider missing", wallet)))
        }
    }
}
