//! Response payloads of the agile and platform REST endpoints.

use serde::Deserialize;
use serde_json::Value;
use sprintqa_core::{Board, Issue, IssueAttachment};

use crate::adf::description_text;

/// A `values` page as returned by the agile board and sprint listings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ValuesPage<T> {
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
    #[serde(default)]
    pub max_results: Option<u64>,
    #[serde(default)]
    pub is_last: Option<bool>,
}

/// An `issues` page of a sprint issue search.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IssuePage {
    #[serde(default)]
    pub issues: Vec<WireIssue>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub is_last: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireBoard {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

impl From<WireBoard> for Board {
    fn from(board: WireBoard) -> Self {
        Board { id: board.id, name: board.name }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireIssue {
    pub key: String,
    #[serde(default)]
    pub fields: WireFields,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Value,
    #[serde(default)]
    pub attachment: Vec<WireAttachment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireAttachment {
    pub id: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub size: u64,
    pub content: String,
}

impl From<WireIssue> for Issue {
    fn from(issue: WireIssue) -> Self {
        let WireFields { summary, description, attachment } = issue.fields;
        Issue {
            key: issue.key,
            summary: summary.unwrap_or_default(),
            description: description_text(&description),
            attachments: attachment
                .into_iter()
                .map(|a| IssueAttachment {
                    id: a.id,
                    filename: a.filename,
                    mime_type: a.mime_type,
                    size: a.size,
                    content_url: a.content,
                })
                .collect(),
        }
    }
}

/// Confluence `content/{id}?expand=body.storage` payload.
#[derive(Debug, Deserialize)]
pub(crate) struct PageContent {
    #[serde(default)]
    pub body: Option<PageBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageBody {
    #[serde(default)]
    pub storage: Option<StorageBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StorageBody {
    pub value: String,
}

impl PageContent {
    pub fn storage_value(self) -> Option<String> {
        self.body?.storage.map(|s| s.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn issue_maps_fields_and_attachments() {
        let wire: WireIssue = serde_json::from_value(json!({
            "id": "10001",
            "key": "PAY-7",
            "fields": {
                "summary": "Refund flow",
                "description": "Refund within 30 days",
                "attachment": [{
                    "id": "55",
                    "filename": "notes.txt",
                    "mimeType": "text/plain",
                    "size": 120,
                    "content": "https://acme.atlassian.net/rest/api/3/attachment/content/55"
                }]
            }
        }))
        .unwrap();
        let issue = Issue::from(wire);
        assert_eq!(issue.key, "PAY-7");
        assert_eq!(issue.summary, "Refund flow");
        assert_eq!(issue.description.as_deref(), Some("Refund within 30 days"));
        assert_eq!(issue.attachments.len(), 1);
        assert!(issue.attachments[0].is_text());
        assert!(issue.attachments[0].content_url.ends_with("/content/55"));
    }

    #[test]
    fn issue_without_optional_fields() {
        let wire: WireIssue =
            serde_json::from_value(json!({"key": "PAY-8", "fields": {"description": null}})).unwrap();
        let issue = Issue::from(wire);
        assert_eq!(issue.summary, "");
        assert_eq!(issue.description, None);
        assert!(issue.attachments.is_empty());
    }
}
