use crate::upload::MAX_SLICE_SIZE;
use crate::wallet::WalletType;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub upload: UploadConfig,
    pub storage: StorageConfig,
    /// Wallets the configured provider reports as installed, keyed by type tag.
    pub wallets: HashMap<String, WalletFixture>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GatewayConfig {
    pub graphql_url: String,
    pub upload_url: String,
    /// Extra request headers as `Name: value` lines.
    pub headers: Vec<String>,
    /// Per-request timeout. Unset means requests may wait indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            graphql_url: "https://uploader.irys.xyz/graphql".to_string(),
            upload_url: "https://your-irys-endpoint.com/upload".to_string(),
            headers: Vec::new(),
            timeout_secs: None,
        }
    }
}

impl GatewayConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Tag values attached to every stored block and used by the existence check.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UploadConfig {
    pub app_name: String,
    pub content_type: String,
    pub index_type: String,
    pub slice_size: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            app_name: "SciQuery".to_string(),
            content_type: "application/pdf".to_string(),
            index_type: "pdf-index".to_string(),
            slice_size: MAX_SLICE_SIZE,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub path: PathBuf,
    /// Keep state in process memory only; nothing survives a restart.
    pub in_memory: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/storage.json"),
            in_memory: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct WalletFixture {
    pub address: String,
    /// When set, connect attempts fail with this message, as if the user declined.
    #[serde(default)]
    pub reject: Option<String>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content =
            fs::read_to_string(path).context(format!("Failed to read config file: {}", path))?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Wallet fixtures keyed by parsed type; unknown tags are skipped.
    pub fn wallet_fixtures(&self) -> HashMap<WalletType, WalletFixture> {
        self.wallets
            .iter()
            .filter_map(|(tag, fixture)| match tag.parse::<WalletType>() {
                Ok(wallet) => Some((wallet, fixture.clone())),
                Err(_) => {
                    tracing::warn!(wallet = %tag, "Ignoring unknown wallet in config");
                    None
                }
            })
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.upload.slice_size == 0 {
            anyhow::bail!("[upload] slice_size must be greater than zero");
        }
        if self.gateway.graphql_url.trim().is_empty() {
            anyhow::bail!("[gateway] graphql_url must not be empty");
        }
        if self.gateway.upload_url.trim().is_empty() {
            anyhow::bail!("[gateway] upload_url must not be empty");
        }
        Ok(())
    }
}
