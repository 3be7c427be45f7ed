use crate::set::ProcessedSet;
use async_trait::async_trait;
use sprintqa_core::Result;

/// Backing store for the processed-set ledger.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Load the recorded keys. Never fails: a missing, unreadable or invalid
    /// store yields an empty set and a warning.
    async fn load(&self) -> ProcessedSet;

    /// Replace the stored keys with `set`.
    async fn save(&self, set: &ProcessedSet) -> Result<()>;
}
