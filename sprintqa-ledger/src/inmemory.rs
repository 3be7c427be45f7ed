use crate::service::LedgerStore;
use crate::set::ProcessedSet;
use async_trait::async_trait;
use sprintqa_core::Result;
use std::sync::{Arc, RwLock};

/// Ledger held in memory only. Clones share the same contents.
#[derive(Clone, Default)]
pub struct InMemoryLedger {
    inner: Arc<RwLock<ProcessedSet>>,
    saves: Arc<RwLock<usize>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_set(set: ProcessedSet) -> Self {
        Self { inner: Arc::new(RwLock::new(set)), saves: Arc::default() }
    }

    /// Snapshot of what has been saved so far.
    pub fn snapshot(&self) -> ProcessedSet {
        self.inner.read().map(|s| s.clone()).unwrap_or_default()
    }

    /// Number of `save` calls received.
    pub fn save_count(&self) -> usize {
        self.saves.read().map(|n| *n).unwrap_or_default()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedger {
    async fn load(&self) -> ProcessedSet {
        self.snapshot()
    }

    async fn save(&self, set: &ProcessedSet) -> Result<()> {
        if let Ok(mut inner) = self.inner.write() {
            *inner = set.clone();
        }
        if let Ok(mut saves) = self.saves.write() {
            *saves += 1;
        }
        Ok(())
    }
}
