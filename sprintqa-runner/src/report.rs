use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;

/// Why a work item was passed over without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoGoal,
    NoDocumentLink,
    NoPageId,
    AlreadyProcessed,
    /// An issue whose summary, description and text attachments are all blank.
    EmptyIssue,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SkipReason::NoGoal => "sprint has no goal",
            SkipReason::NoDocumentLink => "goal has no document link",
            SkipReason::NoPageId => "document link has no page id",
            SkipReason::AlreadyProcessed => "already processed",
            SkipReason::EmptyIssue => "issue has no text",
        })
    }
}

/// Terminal state of one document or issue item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Recorded,
    Skipped(SkipReason),
    /// The item failed; the message is the error that stopped it.
    Failed(String),
}

/// Counters for one pass over the selected sprints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    pub tenants: usize,
    pub sprints: usize,
    pub recorded: usize,
    pub skipped: usize,
    pub failed: usize,
    /// The pass stopped early on a pass-fatal error.
    pub aborted: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl PassReport {
    pub fn started(at: DateTime<Utc>) -> Self {
        Self { started_at: Some(at), ..Self::default() }
    }

    pub fn elapsed(&self) -> Option<TimeDelta> {
        Some(self.finished_at? - self.started_at?)
    }

    pub fn count(&mut self, outcome: &ItemOutcome) {
        match outcome {
            ItemOutcome::Recorded => self.recorded += 1,
            ItemOutcome::Skipped(_) => self.skipped += 1,
            ItemOutcome::Failed(_) => self.failed += 1,
        }
    }
}

impl fmt::Display for PassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tenant(s), {} sprint(s): {} recorded, {} skipped, {} failed{}",
            self.tenants,
            self.sprints,
            self.recorded,
            self.skipped,
            self.failed,
            if self.aborted { " (aborted)" } else { "" }
        )?;
        match self.elapsed() {
            Some(elapsed) => write!(f, " in {} ms", elapsed.num_milliseconds()),
            None => Ok(()),
        }
    }
}
