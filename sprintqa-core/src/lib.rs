//! # sprintqa-core
//!
//! Core types, configuration and service traits for SprintQA.
//!
//! ## Overview
//!
//! - [`QaError`] / [`Result`] - The failure taxonomy shared by every stage
//! - [`DomainConfig`] / [`TenantConfig`] - Tenant bundles and the host resolver
//! - [`Sprint`], [`Issue`], [`TestCase`] - The data model
//! - [`ProcessedKey`] - Idempotency keys recorded in the ledger
//! - [`Tracker`], [`DocumentStore`], [`TestCaseGenerator`], [`Notifier`] - Seams
//!   between the orchestrator and the external systems
//!
//! ## Resolving a tenant
//!
//! ```rust,no_run
//! use sprintqa_core::DomainConfig;
//!
//! let config = DomainConfig::load("config.json")?;
//! let tenant = config.resolve_url("https://acme.atlassian.net/wiki/pages/12345")?;
//! println!("tracker at {}", tenant.jira_base);
//! # Ok::<(), sprintqa_core::QaError>(())
//! ```

pub mod config;
pub mod error;
pub mod key;
pub mod service;
pub mod types;

pub use config::{API_KEY_ENV_VARS, DomainConfig, TenantConfig, host_of};
pub use error::{QaError, Result};
pub use key::ProcessedKey;
pub use service::{DocumentStore, Notifier, TestCaseGenerator, Tracker};
pub use types::{Board, Issue, IssueAttachment, Sprint, TestCase};
