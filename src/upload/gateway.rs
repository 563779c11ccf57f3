//! Remote storage gateway: GraphQL existence index plus per-block upload endpoint.

use super::types::ReceiptId;
use crate::config::{GatewayConfig, UploadConfig};
use crate::utils::headers::gateway_headers;
use async_trait::async_trait;
use derivative::Derivative;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("gateway returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed gateway response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait Gateway: Send + Sync {
    /// Ids of earlier uploads tagged with `doi`. Empty means genuinely none.
    async fn find_existing(&self, doi: &str) -> Result<Vec<ReceiptId>, GatewayError>;

    /// Stores one block and returns its receipt id.
    async fn upload_slice(&self, slice: &str, doi: &str) -> Result<ReceiptId, GatewayError>;
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Tag<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

#[derive(Deserialize)]
struct UploadResponse {
    id: ReceiptId,
}

#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct IrysGateway {
    #[derivative(Debug = "ignore")]
    client: reqwest::Client,
    #[derivative(Debug = "ignore")]
    headers: HeaderMap,
    graphql_url: String,
    upload_url: String,
    tags: UploadConfig,
}

impl IrysGateway {
    pub fn new(gateway: &GatewayConfig, tags: UploadConfig) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = gateway.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            headers: gateway_headers(&gateway.headers),
            graphql_url: gateway.graphql_url.clone(),
            upload_url: gateway.upload_url.clone(),
            tags,
        })
    }

    pub fn tags<'a>(&'a self, doi: &'a str) -> [Tag<'a>; 4] {
        [
            Tag {
                name: "Content-Type",
                value: &self.tags.content_type,
            },
            Tag {
                name: "App-Name",
                value: &self.tags.app_name,
            },
            Tag {
                name: "Type",
                value: &self.tags.index_type,
            },
            Tag {
                name: "Collection",
                value: doi,
            },
        ]
    }

    pub fn existence_query(&self, doi: &str) -> String {
        let filters = self
            .tags(doi)
            .iter()
            .map(|tag| format!("{{ name: {}, values: [{}] }}", quote(tag.name), quote(tag.value)))
            .collect::<Vec<_>>()
            .join(",\n      ");

        format!(
            "query {{\n  transactions(\n    tags: [\n      {}\n    ]\n  ) {{\n    edges {{\n      node {{\n        id\n      }}\n    }}\n  }}\n}}",
            filters
        )
    }

    async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::Status {
            status: status.as_u16(),
            body: truncate(&body, 200),
        })
    }
}

#[async_trait]
impl Gateway for IrysGateway {
    async fn find_existing(&self, doi: &str) -> Result<Vec<ReceiptId>, GatewayError> {
        let payload = json!({ "query": self.existence_query(doi) });

        let response = self
            .client
            .post(&self.graphql_url)
            .headers(self.headers.clone())
            .json(&payload)
            .send()
            .await?;
        let response = Self::error_for_status(response).await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;
        parse_existing(&body)
    }

    async fn upload_slice(&self, slice: &str, doi: &str) -> Result<ReceiptId, GatewayError> {
        let payload = json!({
            "data": slice,
            "tags": self.tags(doi),
        });

        let response = self
            .client
            .post(&self.upload_url)
            .headers(self.headers.clone())
            .json(&payload)
            .send()
            .await?;
        let response = Self::error_for_status(response).await?;

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;
        if upload.id.is_empty() {
            return Err(GatewayError::Malformed("empty receipt id".to_string()));
        }
        Ok(upload.id)
    }
}

/// Reads `data.transactions.edges[].node.id`.
///
/// GraphQL errors or a missing path are failures, never an empty result.
pub fn parse_existing(body: &Value) -> Result<Vec<ReceiptId>, GatewayError> {
    if let Some(errors) = body.get("errors").filter(|e| !e.is_null()) {
        return Err(GatewayError::Malformed(format!("graphql errors: {}", errors)));
    }

    let edges = body
        .pointer("/data/transactions/edges")
        .and_then(Value::as_array)
        .ok_or_else(|| GatewayError::Malformed("missing data.transactions.edges".to_string()))?;

    edges
        .iter()
        .map(|edge| {
            edge.pointer("/node/id")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| GatewayError::Malformed("edge without node.id".to_string()))
        })
        .collect()
}

fn quote(value: &str) -> String {
    // A JSON string literal is a valid GraphQL string literal
    Value::String(value.to_string()).to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
