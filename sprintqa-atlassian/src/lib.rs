//! # sprintqa-atlassian
//!
//! REST clients for the issue tracker (Jira agile + platform APIs) and the
//! document store (Confluence), implementing [`sprintqa_core::Tracker`] and
//! [`sprintqa_core::DocumentStore`].
//!
//! Both authenticate with HTTP basic auth using a tenant's account email and
//! API token.
//!
//! ```rust,no_run
//! use sprintqa_atlassian::{ConfluenceClient, JiraClient};
//! use sprintqa_core::{DocumentStore, DomainConfig, Tracker};
//!
//! # async fn run() -> sprintqa_core::Result<()> {
//! let config = DomainConfig::load("config.json")?;
//! let tenant = config.resolve_url("https://acme.atlassian.net/wiki/pages/12345")?;
//!
//! let jira = JiraClient::for_tenant(tenant, None)?;
//! for board in jira.list_boards().await? {
//!     println!("{} {}", board.id, board.name);
//! }
//!
//! let pages = ConfluenceClient::for_tenant(tenant, None)?;
//! let text = pages.fetch_page_text("12345").await?;
//! # let _ = text;
//! # Ok(())
//! # }
//! ```

mod adf;
mod confluence;
mod html;
mod http;
mod jira;
mod wire;

pub use adf::description_text;
pub use confluence::ConfluenceClient;
pub use html::strip_markup;
pub use http::DEFAULT_TIMEOUT;
pub use jira::{JiraClient, PAGE_SIZE};
