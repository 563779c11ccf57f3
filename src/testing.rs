//! Fakes shared by the unit tests.

use crate::storage::{KeyValueStore, MemoryStore, StoreError};
use crate::upload::{Gateway, GatewayError, ReceiptId, UploadStatus, UPLOAD_STATUS_KEY};
use crate::wallet::{ProviderError, WalletProvider, WalletType};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Ordered log of side effects, shared between fakes.
pub type Journal = Arc<Mutex<Vec<String>>>;

/// Memory store that remembers every write.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    writes: Mutex<Vec<(String, Option<Value>)>>,
    journal: Journal,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_journal(journal: Journal) -> Self {
        Self {
            journal,
            ..Self::default()
        }
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    pub fn upload_history(&self) -> Vec<UploadStatus> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter(|(key, _)| key == UPLOAD_STATUS_KEY)
            .filter_map(|(_, value)| value.clone())
            .map(|value| serde_json::from_value(value).unwrap())
            .collect()
    }
}

#[async_trait]
impl KeyValueStore for RecordingStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let entry = match value.get("progress") {
            Some(progress) => format!("set {} {} {}", key, value["status"], progress),
            None => format!("set {}", key),
        };
        self.journal.lock().unwrap().push(entry.replace('"', ""));
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), Some(value.clone())));
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.journal.lock().unwrap().push(format!("remove {}", key));
        self.writes.lock().unwrap().push((key.to_string(), None));
        self.inner.remove(key).await
    }
}

/// Gateway with a fixed existence answer and an optional failing block.
pub struct ScriptedGateway {
    existing: Vec<ReceiptId>,
    index_failure: Option<Box<dyn Fn() -> GatewayError + Send + Sync>>,
    fail_at: Option<usize>,
    uploads: Mutex<Vec<String>>,
    lookups: AtomicUsize,
    journal: Journal,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            existing: Vec::new(),
            index_failure: None,
            fail_at: None,
            uploads: Mutex::new(Vec::new()),
            lookups: AtomicUsize::new(0),
            journal: Journal::default(),
        }
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }

    pub fn with_existing(mut self, ids: &[&str]) -> Self {
        self.existing = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    /// Every existence check fails with the error `failure` builds.
    pub fn with_index_failure(
        mut self,
        failure: impl Fn() -> GatewayError + Send + Sync + 'static,
    ) -> Self {
        self.index_failure = Some(Box::new(failure));
        self
    }

    /// Make the `n`th block upload (1 based) fail.
    pub fn failing_at(mut self, n: usize) -> Self {
        self.fail_at = Some(n);
        self
    }

    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Gateway for ScriptedGateway {
    async fn find_existing(&self, doi: &str) -> Result<Vec<ReceiptId>, GatewayError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.journal.lock().unwrap().push(format!("lookup {}", doi));
        match &self.index_failure {
            Some(failure) => Err(failure()),
            None => Ok(self.existing.clone()),
        }
    }

    async fn upload_slice(&self, slice: &str, _doi: &str) -> Result<ReceiptId, GatewayError> {
        let n = {
            let mut uploads = self.uploads.lock().unwrap();
            uploads.push(slice.to_string());
            uploads.len()
        };
        self.journal.lock().unwrap().push(format!("upload {}", n));

        if self.fail_at == Some(n) {
            return Err(GatewayError::Status {
                status: 500,
                body: "storage node unavailable".to_string(),
            });
        }
        Ok(format!("receipt-{}", n))
    }
}

/// Wallet provider that counts page-context calls.
pub struct CountingProvider {
    installed: HashSet<WalletType>,
    connect_result: Result<String, ProviderError>,
    probes: AtomicUsize,
    connects: AtomicUsize,
    disconnects: AtomicUsize,
}

impl CountingProvider {
    pub fn new(installed: &[WalletType], connect_result: Result<String, ProviderError>) -> Self {
        Self {
            installed: installed.iter().copied().collect(),
            connect_result,
            probes: AtomicUsize::new(0),
            connects: AtomicUsize::new(0),
            disconnects: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> (usize, usize, usize) {
        (
            self.probes.load(Ordering::SeqCst),
            self.connects.load(Ordering::SeqCst),
            self.disconnects.load(Ordering::SeqCst),
        )
    }
}

#[async_trait]
impl WalletProvider for CountingProvider {
    async fn probe(&self, wallet: WalletType) -> Result<bool, ProviderError> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        Ok(self.installed.contains(&wallet))
    }

    async fn connect(&self, _wallet: WalletType) -> Result<String, ProviderError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.connect_result.clone()
    }

    async fn disconnect(&self, _wallet: WalletType) -> Result<(), ProviderError> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
