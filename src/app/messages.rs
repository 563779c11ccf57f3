use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound request on the extension messaging channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    #[serde(rename_all = "camelCase")]
    ConnectWallet { wallet_type: String },
    #[serde(rename_all = "camelCase")]
    DisconnectWallet { wallet_type: String },
    GetWalletState {},
    #[serde(rename_all = "camelCase")]
    UploadPdf { pdf_base64: String, doi: String },
}

impl Message {
    pub fn kind(&self) -> &'static str {
        match self {
            Message::ConnectWallet { .. } => "CONNECT_WALLET",
            Message::DisconnectWallet { .. } => "DISCONNECT_WALLET",
            Message::GetWalletState {} => "GET_WALLET_STATE",
            Message::UploadPdf { .. } => "UPLOAD_PDF",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn ok() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    pub fn with_data(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl ToString) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }
}
