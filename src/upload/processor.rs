use super::chunker::{slice_count, slices};
use super::gateway::Gateway;
use super::types::{ReceiptId, UploadStatus, UPLOAD_STATUS_KEY};
use crate::error::{Error, Result};
use crate::storage::{self, KeyValueStore};
use crate::utils::file_size::FileSizeUtils;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Uploads a base64 document block by block, persisting progress after every step.
///
/// There is a single persisted status slot, so only one upload may run at a
/// time; a second request while one is in flight fails with
/// [`Error::UploadInProgress`] and leaves the slot untouched.
pub struct PdfUploader {
    gateway: Arc<dyn Gateway>,
    store: Arc<dyn KeyValueStore>,
    slice_size: usize,
    in_flight: Mutex<()>,
}

impl PdfUploader {
    pub fn new(gateway: Arc<dyn Gateway>, store: Arc<dyn KeyValueStore>, slice_size: usize) -> Self {
        Self {
            gateway,
            store,
            slice_size,
            in_flight: Mutex::new(()),
        }
    }

    /// Returns the receipt ids of the stored blocks, in block order, or the ids
    /// of an earlier upload of the same `doi`.
    ///
    /// Any failure aborts the whole upload: no retry, no partial receipt list.
    pub async fn upload(&self, pdf_base64: &str, doi: &str) -> Result<Vec<ReceiptId>> {
        let _guard = self.in_flight.try_lock().map_err(|_| {
            tracing::warn!(doi, "Rejecting upload while another is in progress");
            Error::UploadInProgress
        })?;

        match self.process(pdf_base64, doi).await {
            Ok(receipt_ids) => Ok(receipt_ids),
            Err(e) => {
                tracing::error!(doi, error = %e, "Upload failed");
                if let Err(store_err) = self.save(&UploadStatus::error(&e)).await {
                    tracing::error!(error = %store_err, "Failed to persist error status");
                }
                Err(e)
            }
        }
    }

    async fn process(&self, pdf_base64: &str, doi: &str) -> Result<Vec<ReceiptId>> {
        self.save(&UploadStatus::processing()).await?;

        let total = slice_count(pdf_base64.chars().count(), self.slice_size);
        tracing::info!(
            doi,
            size = %FileSizeUtils::format_size(FileSizeUtils::decoded_len(pdf_base64)),
            blocks = total,
            "Processing document"
        );

        let existing = self
            .gateway
            .find_existing(doi)
            .await
            .map_err(Error::DedupQuery)?;

        if !existing.is_empty() {
            tracing::info!(doi, count = existing.len(), "Document already stored");
            self.save(&UploadStatus::exists(existing.clone())).await?;
            return Ok(existing);
        }

        let mut receipt_ids = Vec::with_capacity(total);
        for (index, slice) in slices(pdf_base64, self.slice_size).enumerate() {
            self.save(&UploadStatus::uploading(index, total)).await?;

            let receipt_id = self
                .gateway
                .upload_slice(slice, doi)
                .await
                .map_err(|e| Error::UploadTransport {
                    slice: index + 1,
                    total,
                    detail: e.to_string(),
                })?;

            tracing::debug!(doi, block = index + 1, total, %receipt_id, "Block stored");
            receipt_ids.push(receipt_id);
        }

        self.save(&UploadStatus::completed(receipt_ids.clone())).await?;
        tracing::info!(doi, blocks = receipt_ids.len(), "Upload completed");

        Ok(receipt_ids)
    }

    async fn save(&self, status: &UploadStatus) -> Result<()> {
        storage::put(self.store.as_ref(), UPLOAD_STATUS_KEY, status).await?;
        Ok(())
    }
}
