//! Extraction of the linked design document from a sprint goal.

use regex::Regex;
use std::sync::LazyLock;

static DOCUMENT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://\S+/wiki\S*").expect("unreachable error: invalid document link pattern")
});
static PAGE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(\d+)(?:/|$)").expect("unreachable error: invalid page id pattern")
});

/// What a sprint goal says about its design document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalLink {
    /// The goal is absent or blank.
    NoGoal,
    /// The goal has no document-store link.
    NoDocumentLink,
    /// A link is present but carries no numeric page id.
    NoPageId { url: String },
    Document { url: String, page_id: String },
}

/// Parse a sprint goal. Only the first document link is considered.
pub fn parse_goal(goal: Option<&str>) -> GoalLink {
    let Some(goal) = goal.map(str::trim).filter(|g| !g.is_empty()) else {
        return GoalLink::NoGoal;
    };
    let Some(link) = DOCUMENT_LINK.find(goal) else {
        return GoalLink::NoDocumentLink;
    };
    let url = link.as_str().to_string();
    match PAGE_ID.captures(&url).and_then(|c| c.get(1)) {
        Some(id) => GoalLink::Document { page_id: id.as_str().to_string(), url },
        None => GoalLink::NoPageId { url },
    }
}
