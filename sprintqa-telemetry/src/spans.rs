//! Span helpers for the polling pipeline
//!
//! Spans nest as pass > tenant > sprint > item, so every event logged while
//! processing an item carries the full context.

use tracing::Span;

/// Create a span for one polling pass
///
/// # Example
/// ```
/// use sprintqa_telemetry::pass_span;
/// let span = pass_span(1);
/// let _enter = span.enter();
/// ```
pub fn pass_span(pass_no: u64) -> Span {
    tracing::info_span!("pass", pass.no = pass_no)
}

/// Create a span for one tenant within a pass
pub fn tenant_span(host: &str) -> Span {
    tracing::info_span!("tenant", tenant.host = host)
}

/// Create a span for one sprint
///
/// # Example
/// ```
/// use sprintqa_telemetry::sprint_span;
/// let span = sprint_span("Payments", 37);
/// let _enter = span.enter();
/// ```
pub fn sprint_span(board_name: &str, sprint_id: u64) -> Span {
    tracing::info_span!("sprint", board.name = board_name, sprint.id = sprint_id)
}

/// Create a span for one work item, either a document or an issue
pub fn item_span(kind: &str, key: &str) -> Span {
    tracing::debug_span!("item", item.kind = kind, item.key = key)
}
