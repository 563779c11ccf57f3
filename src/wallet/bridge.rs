use super::{
    ProviderError, UnknownWalletType, WalletInfo, WalletProvider, WalletState, WalletType,
    WALLET_STATE_KEY,
};
use crate::error::{Error, Result};
use crate::storage::{self, KeyValueStore};
use std::sync::Arc;

/// Connects and disconnects page wallets and keeps the persisted connection record.
#[derive(Clone)]
pub struct WalletBridge {
    provider: Arc<dyn WalletProvider>,
    store: Arc<dyn KeyValueStore>,
}

impl WalletBridge {
    pub fn new(provider: Arc<dyn WalletProvider>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { provider, store }
    }

    pub async fn connect(&self, wallet_type: &str) -> Result<WalletInfo> {
        let wallet = parse_wallet(wallet_type)?;

        let installed = self
            .provider
            .probe(wallet)
            .await
            .map_err(|e| provider_error(wallet, e))?;
        if !installed {
            tracing::warn!(%wallet, "Wallet provider not present in page");
            return Err(Error::WalletNotInstalled(wallet.to_string()));
        }

        let address = self
            .provider
            .connect(wallet)
            .await
            .map_err(|e| provider_error(wallet, e))?;

        let info = WalletInfo::new(wallet, address);
        storage::put(
            self.store.as_ref(),
            WALLET_STATE_KEY,
            &WalletState::connected(info.clone()),
        )
        .await?;

        tracing::info!(%wallet, chain = wallet.chain(), address = %info.address, "Wallet connected");
        Ok(info)
    }

    /// Wallets without a provider-side disconnect are only cleared locally.
    pub async fn disconnect(&self, wallet_type: &str) -> Result<()> {
        let wallet = parse_wallet(wallet_type)?;

        if wallet.supports_disconnect() {
            self.provider
                .disconnect(wallet)
                .await
                .map_err(|e| provider_error(wallet, e))?;
        }

        self.store.remove(WALLET_STATE_KEY).await?;
        tracing::info!(%wallet, "Wallet disconnected");
        Ok(())
    }

    pub async fn state(&self) -> Result<WalletState> {
        Ok(storage::fetch(self.store.as_ref(), WALLET_STATE_KEY)
            .await?
            .unwrap_or_default())
    }
}

fn parse_wallet(wallet_type: &str) -> Result<WalletType> {
    wallet_type.parse().map_err(|UnknownWalletType(tag)| {
        tracing::warn!(wallet = %tag, "Unsupported wallet type");
        Error::UnsupportedWalletType(tag)
    })
}

fn provider_error(wallet: WalletType, source: ProviderError) -> Error {
    tracing::error!(%wallet, error = %source, "Wallet provider call failed");
    Error::WalletProvider {
        wallet: wallet.to_string(),
        source,
    }
}
