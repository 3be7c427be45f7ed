//! # sprintqa-runner
//!
//! The polling pipeline: for every configured tenant, find active sprints,
//! turn each sprint's linked design document and each issue's text into
//! generated test cases, attach the spreadsheet, notify the team, and record
//! the work so it is never repeated.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sprintqa_core::DomainConfig;
//! use sprintqa_ledger::JsonFileLedger;
//! use sprintqa_runner::{
//!     HttpServiceFactory, Orchestrator, OrchestratorConfig, RunnerSettings, SprintSelection,
//! };
//! use std::sync::Arc;
//!
//! # async fn run() -> sprintqa_core::Result<()> {
//! let settings = RunnerSettings::default();
//! let orchestrator = Orchestrator::new(OrchestratorConfig {
//!     domains: Arc::new(DomainConfig::load("config.json")?),
//!     services: Arc::new(HttpServiceFactory::new(settings.http_timeout)),
//!     ledger: Arc::new(JsonFileLedger::new(&settings.ledger_path)),
//!     settings,
//! });
//! let report = orchestrator.run_pass(&SprintSelection::AllActive).await;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod factory;
pub mod goal;
pub mod issue_text;
pub mod naming;
pub mod orchestrator;
pub mod report;
pub mod scheduler;
pub mod selection;
pub mod settings;

pub use factory::{HttpServiceFactory, ServiceFactory};
pub use goal::{GoalLink, parse_goal};
pub use issue_text::{MAX_TEXT_ATTACHMENT_BYTES, collect_issue_text, content_hash};
pub use naming::{document_file_name, issue_file_name};
pub use orchestrator::{Orchestrator, OrchestratorConfig};
pub use report::{ItemOutcome, PassReport, SkipReason};
pub use scheduler::PollingScheduler;
pub use selection::SprintSelection;
pub use settings::{DEFAULT_POLL_INTERVAL, RunnerSettings};
