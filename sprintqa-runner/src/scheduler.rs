use sprintqa_telemetry::pass_span;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::orchestrator::Orchestrator;
use crate::report::PassReport;
use crate::selection::SprintSelection;

/// Re-runs the orchestrator at a fixed interval until cancelled.
pub struct PollingScheduler {
    orchestrator: Arc<Orchestrator>,
    selection: SprintSelection,
    interval: Duration,
}

impl PollingScheduler {
    pub fn new(orchestrator: Arc<Orchestrator>, selection: SprintSelection) -> Self {
        let interval = orchestrator.settings().poll_interval;
        Self { orchestrator, selection, interval }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run passes back to back, sleeping `interval` in between.
    ///
    /// Cancellation is observed during the sleep and during a pass; a pass
    /// interrupted mid-way records only what it had already saved. Returns the
    /// number of passes that ran to completion.
    pub async fn run(&self, token: CancellationToken) -> u64 {
        let mut completed = 0u64;
        loop {
            let pass_no = completed + 1;
            let pass = self.orchestrator.run_pass(&self.selection).instrument(pass_span(pass_no));
            let report: PassReport = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::info!(pass.no = pass_no, "cancelled during pass");
                    break;
                }
                report = pass => report,
            };
            completed += 1;
            tracing::debug!(pass.no = pass_no, %report, "waiting {:?} for next pass", self.interval);

            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
        tracing::info!(passes = completed, "scheduler stopped");
        completed
    }
}
