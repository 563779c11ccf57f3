mod chunker;
mod gateway;
mod processor;
mod types;

pub use chunker::MAX_SLICE_SIZE;
pub use gateway::{Gateway, GatewayError, IrysGateway};
pub use processor::PdfUploader;
pub use types::{ReceiptId, StatusKind, UploadStatus, UPLOAD_STATUS_KEY};
