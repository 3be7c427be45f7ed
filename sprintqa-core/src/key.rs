use std::fmt;

const ISSUE_CONTENT_PREFIX: &str = "issue-sha256:";

/// Identifier of a completed unit of work.
///
/// Document keys and issue-content keys live in separate domains: two keys of
/// different kinds are never equal, even when their inner strings match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProcessedKey {
    /// A document-store page id, e.g. `"12345"`.
    Document(String),
    /// SHA-256 hex digest of an issue's concatenated text.
    IssueContent(String),
}

impl ProcessedKey {
    pub fn document(page_id: impl Into<String>) -> Self {
        ProcessedKey::Document(page_id.into())
    }

    pub fn issue_content(digest: impl Into<String>) -> Self {
        ProcessedKey::IssueContent(digest.into())
    }

    /// Encoding used in the ledger file. Document keys stay bare so ledgers
    /// written before issue keys existed still load.
    pub fn to_ledger_string(&self) -> String {
        match self {
            ProcessedKey::Document(id) => id.clone(),
            ProcessedKey::IssueContent(digest) => format!("{ISSUE_CONTENT_PREFIX}{digest}"),
        }
    }

    pub fn from_ledger_string(raw: &str) -> Self {
        match raw.strip_prefix(ISSUE_CONTENT_PREFIX) {
            Some(digest) => ProcessedKey::IssueContent(digest.to_string()),
            None => ProcessedKey::Document(raw.to_string()),
        }
    }
}

impl fmt::Display for ProcessedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessedKey::Document(id) => write!(f, "document:{id}"),
            ProcessedKey::IssueContent(digest) => write!(f, "issue:{digest}"),
        }
    }
}
