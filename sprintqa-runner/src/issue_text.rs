use sha2::{Digest, Sha256};
use sprintqa_core::{Issue, Result, Tracker};

/// Largest `text/*` attachment folded into an issue's text.
pub const MAX_TEXT_ATTACHMENT_BYTES: u64 = 1024 * 1024;

/// Summary, description and small text attachments of an issue, separated
/// by blank lines. Empty parts are left out.
pub async fn collect_issue_text(tracker: &dyn Tracker, issue: &Issue) -> Result<String> {
    let mut parts = Vec::new();
    if !issue.summary.trim().is_empty() {
        parts.push(issue.summary.clone());
    }
    if let Some(description) = issue.description.as_deref().filter(|d| !d.trim().is_empty()) {
        parts.push(description.to_string());
    }
    for attachment in issue.attachments.iter().filter(|a| a.is_text()) {
        if attachment.size > MAX_TEXT_ATTACHMENT_BYTES {
            tracing::debug!(issue = %issue.key, attachment = %attachment.filename, size = attachment.size, "attachment too large, not included");
            continue;
        }
        let text = tracker.fetch_attachment_text(attachment).await?;
        if !text.trim().is_empty() {
            parts.push(text);
        }
    }
    Ok(parts.join("\n\n"))
}

/// Lower-case hex SHA-256 of `text`.
pub fn content_hash(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}
