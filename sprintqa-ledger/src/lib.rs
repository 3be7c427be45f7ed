//! # sprintqa-ledger
//!
//! The processed-set ledger: the only record of which documents and issues
//! already have generated test cases.
//!
//! - [`ProcessedSet`] - In-memory set of [`ProcessedKey`](sprintqa_core::ProcessedKey)s
//! - [`LedgerStore`] - Load/save contract (loading never fails)
//! - [`JsonFileLedger`] - JSON array on disk, replaced atomically on save
//! - [`InMemoryLedger`] - Volatile store for tests and dry runs

pub mod file;
pub mod inmemory;
pub mod service;
pub mod set;

pub use file::{DEFAULT_LEDGER_FILE, JsonFileLedger};
pub use inmemory::InMemoryLedger;
pub use service::LedgerStore;
pub use set::ProcessedSet;
