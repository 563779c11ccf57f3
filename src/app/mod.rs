mod messages;
mod state;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::upload::{Gateway, GatewayError, IrysGateway, PdfUploader, ReceiptId};
use crate::wallet::{ConfiguredProvider, WalletBridge, WalletProvider};
pub use messages::{Message, Response};
use serde_json::Value;
pub use state::Snapshot;
use std::sync::Arc;

/// Background host: routes inbound messages to the wallet bridge or the uploader.
pub struct Background {
    wallets: WalletBridge,
    uploader: PdfUploader,
    store: Arc<dyn KeyValueStore>,
}

impl Background {
    pub fn new(
        provider: Arc<dyn WalletProvider>,
        gateway: Arc<dyn Gateway>,
        store: Arc<dyn KeyValueStore>,
        slice_size: usize,
    ) -> Self {
        Self {
            wallets: WalletBridge::new(provider, store.clone()),
            uploader: PdfUploader::new(gateway, store.clone(), slice_size),
            store,
        }
    }

    pub fn from_config(config: &Config) -> std::result::Result<Self, GatewayError> {
        let store: Arc<dyn KeyValueStore> = if config.storage.in_memory {
            tracing::info!("Keeping state in memory");
            Arc::new(MemoryStore::new())
        } else {
            let store = FileStore::new(&config.storage.path);
            tracing::info!(path = %store.path().display(), "Persisting state to file");
            Arc::new(store)
        };

        tracing::info!(
            graphql = %config.gateway.graphql_url,
            upload = %config.gateway.upload_url,
            wallets = config.wallets.len(),
            "Initializing background host"
        );

        let gateway = IrysGateway::new(&config.gateway, config.upload.clone())?;
        let provider = ConfiguredProvider::new(config.wallet_fixtures());

        Ok(Self::new(
            Arc::new(provider),
            Arc::new(gateway),
            store,
            config.upload.slice_size,
        ))
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub async fn snapshot(&self) -> Result<Snapshot> {
        Snapshot::load(self.store()).await
    }

    /// Parses one raw message; unreadable input gets a failure response.
    pub async fn handle_json(&self, raw: &str) -> Response {
        match serde_json::from_str::<Message>(raw) {
            Ok(message) => self.handle(message).await,
            Err(e) => {
                tracing::warn!(error = %e, "Rejecting malformed message");
                Response::failure(Error::InvalidRequest(e.to_string()))
            }
        }
    }

    pub async fn handle(&self, message: Message) -> Response {
        let kind = message.kind();
        tracing::debug!(kind, "Handling message");

        match self.dispatch(message).await {
            Ok(Some(data)) => Response::with_data(data),
            Ok(None) => Response::ok(),
            Err(e) => {
                tracing::warn!(kind, error = %e, "Message failed");
                Response::failure(e)
            }
        }
    }

    async fn dispatch(&self, message: Message) -> Result<Option<Value>> {
        match message {
            Message::ConnectWallet { wallet_type } => {
                let info = self.wallets.connect(&wallet_type).await?;
                Ok(Some(serde_json::to_value(info)?))
            }
            Message::DisconnectWallet { wallet_type } => {
                self.wallets.disconnect(&wallet_type).await?;
                Ok(None)
            }
            Message::GetWalletState {} => {
                let state = self.wallets.state().await?;
                Ok(Some(serde_json::to_value(state)?))
            }
            Message::UploadPdf { pdf_base64, doi } => {
                if pdf_base64.is_empty() {
                    return Err(Error::InvalidRequest("pdfBase64 is empty".to_string()));
                }
                if doi.trim().is_empty() {
                    return Err(Error::InvalidRequest("doi is empty".to_string()));
                }

                let receipt_ids: Vec<ReceiptId> = self.uploader.upload(&pdf_base64, &doi).await?;
                Ok(Some(serde_json::to_value(receipt_ids)?))
            }
        }
    }
}
