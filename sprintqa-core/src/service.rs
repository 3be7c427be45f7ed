use crate::error::Result;
use crate::types::{Board, Issue, IssueAttachment, Sprint, TestCase};
use async_trait::async_trait;
use std::path::Path;

/// Issue-tracker operations used by the pipeline.
#[async_trait]
pub trait Tracker: Send + Sync {
    /// Every board visible to the tenant, across all pages.
    async fn list_boards(&self) -> Result<Vec<Board>>;

    /// Sprints in the `active` state on a board, across all pages.
    async fn list_active_sprints(&self, board: &Board) -> Result<Vec<Sprint>>;

    async fn get_sprint(&self, sprint_id: u64) -> Result<Sprint>;

    /// Every issue in a sprint, across all pages.
    async fn list_issues(&self, sprint_id: u64) -> Result<Vec<Issue>>;

    /// Download an attachment and decode it as UTF-8 text (lossily).
    async fn fetch_attachment_text(&self, attachment: &IssueAttachment) -> Result<String>;

    /// Upload `file` as a binary attachment of `issue_key`.
    async fn attach(&self, issue_key: &str, file: &Path) -> Result<()>;
}

/// Document-store access.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Retrieve a page and return its body with all markup removed.
    async fn fetch_page_text(&self, page_id: &str) -> Result<String>;
}

/// Turns free text into structured test cases.
#[async_trait]
pub trait TestCaseGenerator: Send + Sync {
    async fn generate(&self, document_text: &str) -> Result<Vec<TestCase>>;
}

/// Chat delivery of status messages.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<()>;
}
