use crate::error::Result;
use crate::storage::{self, KeyValueStore};
use crate::upload::{StatusKind, UploadStatus, UPLOAD_STATUS_KEY};
use crate::wallet::{WalletState, WALLET_STATE_KEY};

/// What a reader of the persisted store currently sees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub upload: Option<UploadStatus>,
    pub wallet: WalletState,
}

impl Snapshot {
    pub async fn load(store: &dyn KeyValueStore) -> Result<Self> {
        Ok(Self {
            upload: storage::fetch(store, UPLOAD_STATUS_KEY).await?,
            wallet: storage::fetch(store, WALLET_STATE_KEY)
                .await?
                .unwrap_or_default(),
        })
    }

    pub fn upload_text(&self) -> String {
        let Some(status) = &self.upload else {
            return "Upload: idle".to_string();
        };

        let receipts = status
            .receipt_ids
            .as_ref()
            .map(|ids| format!(" | receipts: {}", ids.join(", ")))
            .unwrap_or_default();

        match status.status {
            StatusKind::Uploading | StatusKind::Processing => format!(
                "Upload: {} ({}%)",
                status.message, status.progress
            ),
            StatusKind::Error => format!("Upload: {}", status.message),
            _ => format!("Upload: {}{}", status.message, receipts),
        }
    }

    pub fn wallet_text(&self) -> String {
        match (self.wallet.is_connected, &self.wallet.current_wallet) {
            (true, Some(info)) => format!("Wallet: {} connected ({})", info.name, info.address),
            _ => "Wallet: not connected".to_string(),
        }
    }
}
