mod common;

use common::*;
use sprintqa_core::Board;
use sprintqa_ledger::InMemoryLedger;
use sprintqa_runner::{PollingScheduler, RunnerSettings, SprintSelection};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn idle_harness() -> Harness {
    let tracker = MockTracker {
        boards: vec![Board { id: 1, name: "Payments".into() }],
        ..MockTracker::default()
    };
    Harness::new(
        tracker,
        MockDocuments::default(),
        MockGenerator::returning(30),
        Arc::new(InMemoryLedger::new()),
        RunnerSettings::default().with_poll_interval(Duration::from_secs(10)),
    )
}

#[tokio::test(start_paused = true)]
async fn runs_a_pass_every_interval_until_cancelled() {
    let Harness { services, orchestrator, output: _output } = idle_harness();
    let scheduler = PollingScheduler::new(Arc::new(orchestrator), SprintSelection::AllActive);
    let token = CancellationToken::new();

    let handle = tokio::spawn({
        let token = token.clone();
        async move { scheduler.run(token).await }
    });
    tokio::time::sleep(Duration::from_secs(25)).await;
    token.cancel();

    assert_eq!(handle.await.unwrap(), 3);
    assert_eq!(services.notifier.messages().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn cancelled_token_stops_before_first_pass() {
    let Harness { services, orchestrator, output: _output } = idle_harness();
    let scheduler = PollingScheduler::new(Arc::new(orchestrator), SprintSelection::AllActive)
        .with_interval(Duration::from_secs(1));
    let token = CancellationToken::new();
    token.cancel();

    assert_eq!(scheduler.run(token).await, 0);
    assert!(services.notifier.messages().is_empty());
}
