use sprintqa_ledger::DEFAULT_LEDGER_FILE;
use std::path::PathBuf;
use std::time::Duration;

/// Default wait between two polling passes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Runtime settings shared by the orchestrator and the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerSettings {
    /// Directory generated spreadsheets are written to.
    pub output_dir: PathBuf,
    pub ledger_path: PathBuf,
    /// Run the sprint-goal document pass.
    pub document_pass: bool,
    /// Run the per-issue content pass.
    pub issue_pass: bool,
    /// Per-request timeout for every HTTP collaborator; `None` uses each client's default.
    pub http_timeout: Option<Duration>,
    pub poll_interval: Duration,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            ledger_path: PathBuf::from(DEFAULT_LEDGER_FILE),
            document_pass: true,
            issue_pass: true,
            http_timeout: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl RunnerSettings {
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_ledger_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ledger_path = path.into();
        self
    }

    pub fn with_document_pass(mut self, enabled: bool) -> Self {
        self.document_pass = enabled;
        self
    }

    pub fn with_issue_pass(mut self, enabled: bool) -> Self {
        self.issue_pass = enabled;
        self
    }

    pub fn with_http_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}
