use serde::{Deserialize, Serialize};

/// Storage key of the single upload-status slot.
pub const UPLOAD_STATUS_KEY: &str = "uploadStatus";

/// Opaque identifier the gateway returns for a stored block.
pub type ReceiptId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    #[default]
    Idle,
    Processing,
    Uploading,
    Exists,
    Completed,
    Error,
}

/// Persisted progress record of the current upload, overwritten at each step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UploadStatus {
    pub status: StatusKind,
    pub message: String,
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_ids: Option<Vec<ReceiptId>>,
}

impl UploadStatus {
    pub fn processing() -> Self {
        Self {
            status: StatusKind::Processing,
            message: "Processing file...".to_string(),
            progress: 0,
            receipt_ids: None,
        }
    }

    pub fn exists(receipt_ids: Vec<ReceiptId>) -> Self {
        Self {
            status: StatusKind::Exists,
            message: "File already exists".to_string(),
            progress: 100,
            receipt_ids: Some(receipt_ids),
        }
    }

    /// Status written before block `index` (zero based) of `total` is sent.
    pub fn uploading(index: usize, total: usize) -> Self {
        Self {
            status: StatusKind::Uploading,
            message: format!("Uploading block {}/{}...", index + 1, total),
            progress: progress_percent(index, total),
            receipt_ids: None,
        }
    }

    pub fn completed(receipt_ids: Vec<ReceiptId>) -> Self {
        Self {
            status: StatusKind::Completed,
            message: "Upload complete".to_string(),
            progress: 100,
            receipt_ids: Some(receipt_ids),
        }
    }

    pub fn error(detail: impl std::fmt::Display) -> Self {
        Self {
            status: StatusKind::Error,
            message: format!("Upload failed: {}", detail),
            progress: 0,
            receipt_ids: None,
        }
    }
}

/// `floor(done / total * 100)`, computed in integers.
pub fn progress_percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (done.min(total) * 100 / total) as u8
}
