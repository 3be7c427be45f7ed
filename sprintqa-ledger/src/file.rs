use crate::service::LedgerStore;
use crate::set::ProcessedSet;
use async_trait::async_trait;
use sprintqa_core::{QaError, Result};
use std::path::{Path, PathBuf};

/// Default ledger location, relative to the working directory.
pub const DEFAULT_LEDGER_FILE: &str = "processed_confluence_pages.json";

/// Ledger persisted as a JSON array of key strings.
#[derive(Debug, Clone)]
pub struct JsonFileLedger {
    path: PathBuf,
}

impl JsonFileLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for JsonFileLedger {
    fn default() -> Self {
        Self::new(DEFAULT_LEDGER_FILE)
    }
}

#[async_trait]
impl LedgerStore for JsonFileLedger {
    async fn load(&self) -> ProcessedSet {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no ledger file yet, starting empty");
                return ProcessedSet::new();
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "could not read ledger file, resetting"
                );
                return ProcessedSet::new();
            }
        };

        if data.trim().is_empty() {
            return ProcessedSet::new();
        }

        match serde_json::from_str::<Vec<String>>(&data) {
            Ok(raw) => ProcessedSet::from_ledger_strings(raw),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "ledger file is not a JSON array of strings, resetting"
                );
                ProcessedSet::new()
            }
        }
    }

    async fn save(&self, set: &ProcessedSet) -> Result<()> {
        let body = serde_json::to_vec(&set.to_ledger_strings())?;
        let temp = self.temp_path();

        tokio::fs::write(&temp, body).await.map_err(|e| {
            QaError::Ledger(format!("failed to write {}: {e}", temp.display()))
        })?;
        tokio::fs::rename(&temp, &self.path).await.map_err(|e| {
            QaError::Ledger(format!("failed to replace {}: {e}", self.path.display()))
        })?;

        tracing::debug!(path = %self.path.display(), keys = set.len(), "ledger saved");
        Ok(())
    }
}
