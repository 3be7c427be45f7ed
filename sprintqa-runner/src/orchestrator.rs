use chrono::Utc;
use sprintqa_core::{
    Board, DomainConfig, Issue, Notifier, ProcessedKey, QaError, Result, Sprint, TenantConfig,
    Tracker,
};
use sprintqa_ledger::{LedgerStore, ProcessedSet};
use sprintqa_telemetry::{item_span, sprint_span, tenant_span};
use sprintqa_testcase::Synthesizer;
use std::sync::Arc;
use tracing::Instrument;

use crate::factory::ServiceFactory;
use crate::goal::{GoalLink, parse_goal};
use crate::issue_text::{collect_issue_text, content_hash};
use crate::naming::{document_file_name, issue_file_name};
use crate::report::{ItemOutcome, PassReport, SkipReason};
use crate::selection::SprintSelection;
use crate::settings::RunnerSettings;

pub struct OrchestratorConfig {
    pub domains: Arc<DomainConfig>,
    pub services: Arc<dyn ServiceFactory>,
    pub ledger: Arc<dyn LedgerStore>,
    pub settings: RunnerSettings,
}

/// Drives discovery → fetch → synthesize → attach → notify → record for the
/// selected sprints of every tenant.
///
/// Items are processed strictly one after another. A failing item is
/// reported through the tenant's notifier and the pass moves on; only a
/// ledger failure ends the pass.
pub struct Orchestrator {
    domains: Arc<DomainConfig>,
    services: Arc<dyn ServiceFactory>,
    ledger: Arc<dyn LedgerStore>,
    settings: RunnerSettings,
}

/// Clients bound to one tenant for the duration of a pass.
struct TenantSession<'a> {
    tenant: &'a TenantConfig,
    tracker: Arc<dyn Tracker>,
    notifier: Arc<dyn Notifier>,
    synthesizer: Synthesizer,
}

impl TenantSession<'_> {
    /// Post a message; delivery failures are logged, never raised.
    async fn notify(&self, message: &str) {
        if let Err(err) = self.notifier.notify(message).await {
            tracing::warn!(error = %err, "notification not delivered");
        }
    }
}

fn find_board<'b>(boards: &'b [Board], name: &str) -> Option<&'b Board> {
    let name = name.trim();
    boards
        .iter()
        .find(|b| b.name == name)
        .or_else(|| boards.iter().find(|b| b.name.eq_ignore_ascii_case(name)))
}

impl Orchestrator {
    pub fn new(config: OrchestratorConfig) -> Self {
        Self {
            domains: config.domains,
            services: config.services,
            ledger: config.ledger,
            settings: config.settings,
        }
    }

    pub fn settings(&self) -> &RunnerSettings {
        &self.settings
    }

    /// Run one pass. The ledger is loaded at the start and saved after every
    /// recorded item.
    pub async fn run_pass(&self, selection: &SprintSelection) -> PassReport {
        let mut processed = self.ledger.load().await;
        let mut report = PassReport::started(Utc::now());
        tracing::info!(%selection, known = processed.len(), "pass started");

        if let Err(err) = tokio::fs::create_dir_all(&self.settings.output_dir).await {
            tracing::warn!(dir = %self.settings.output_dir.display(), error = %err, "cannot create output directory");
        }

        let result = match selection {
            SprintSelection::AllActive => self.run_all_active(&mut processed, &mut report).await,
            SprintSelection::Single { board_name, sprint_id } => {
                self.run_single(board_name, *sprint_id, &mut processed, &mut report).await
            }
        };
        if let Err(err) = result {
            report.aborted = true;
            tracing::error!(kind = err.kind(), error = %err, "pass aborted");
        }
        report.finished_at = Some(Utc::now());

        tracing::info!(%report, "pass finished");
        report
    }

    fn open_session<'t>(&self, tenant: &'t TenantConfig) -> Result<TenantSession<'t>> {
        Ok(TenantSession {
            tenant,
            tracker: self.services.tracker(tenant)?,
            notifier: self.services.notifier(tenant)?,
            synthesizer: Synthesizer::new(self.services.generator(tenant)?),
        })
    }

    async fn run_all_active(&self, processed: &mut ProcessedSet, report: &mut PassReport) -> Result<()> {
        for tenant in self.domains.tenants() {
            report.tenants += 1;
            self.run_tenant(tenant, processed, report).instrument(tenant_span(&tenant.host)).await?;
        }
        Ok(())
    }

    async fn run_tenant(
        &self,
        tenant: &TenantConfig,
        processed: &mut ProcessedSet,
        report: &mut PassReport,
    ) -> Result<()> {
        let session = match self.open_session(tenant) {
            Ok(session) => session,
            Err(err) => {
                tracing::error!(error = %err, "cannot create clients for tenant");
                report.failed += 1;
                return Ok(());
            }
        };

        let boards = match session.tracker.list_boards().await {
            Ok(boards) => boards,
            Err(err) => {
                tracing::error!(error = %err, "cannot list boards");
                session.notify(&format!("Failed to list boards on {}: {err}", tenant.jira_base)).await;
                report.failed += 1;
                return Ok(());
            }
        };

        let mut active = Vec::new();
        for board in boards {
            match session.tracker.list_active_sprints(&board).await {
                Ok(sprints) => active.extend(sprints.into_iter().map(|s| (board.clone(), s))),
                Err(err) => {
                    tracing::warn!(board = %board.name, error = %err, "failed to fetch sprints for board");
                }
            }
        }

        if active.is_empty() {
            tracing::info!("no active sprints");
            session
                .notify(&format!("⚠️ No active sprints found across all boards ({}).", tenant.jira_base))
                .await;
            return Ok(());
        }

        for (board, sprint) in &active {
            report.sprints += 1;
            self.run_sprint(&session, board, sprint, processed, report).await?;
        }
        Ok(())
    }

    async fn run_single(
        &self,
        board_name: &str,
        sprint_id: u64,
        processed: &mut ProcessedSet,
        report: &mut PassReport,
    ) -> Result<()> {
        for tenant in self.domains.tenants() {
            let session = match self.open_session(tenant) {
                Ok(session) => session,
                Err(err) => {
                    tracing::warn!(tenant = %tenant.host, error = %err, "cannot create clients for tenant");
                    continue;
                }
            };
            let boards = match session.tracker.list_boards().await {
                Ok(boards) => boards,
                Err(err) => {
                    tracing::warn!(tenant = %tenant.host, error = %err, "cannot list boards");
                    continue;
                }
            };
            let Some(board) = find_board(&boards, board_name) else {
                continue;
            };

            report.tenants += 1;
            let sprint = match session.tracker.get_sprint(sprint_id).await {
                Ok(sprint) => sprint,
                Err(err) => {
                    tracing::error!(sprint.id = sprint_id, error = %err, "cannot read sprint");
                    session
                        .notify(&format!(
                            "Failed for sprint {sprint_id} on board *{}* ({}): {err}",
                            board.name, tenant.jira_base
                        ))
                        .await;
                    report.failed += 1;
                    return Ok(());
                }
            };
            report.sprints += 1;
            return self
                .run_sprint(&session, board, &sprint, processed, report)
                .instrument(tenant_span(&tenant.host))
                .await;
        }

        tracing::warn!(board = board_name, "no configured tenant has a board with this name");
        Ok(())
    }

    /// Both passes for one sprint. A pass-fatal error is announced once and returned.
    async fn run_sprint(
        &self,
        session: &TenantSession<'_>,
        board: &Board,
        sprint: &Sprint,
        processed: &mut ProcessedSet,
        report: &mut PassReport,
    ) -> Result<()> {
        let result = self
            .process_sprint(session, board, sprint, processed, report)
            .instrument(sprint_span(&board.name, sprint.id))
            .await;
        if let Err(err) = &result {
            session.notify(&format!("Automation failed entirely: {err}")).await;
        }
        result
    }

    async fn process_sprint(
        &self,
        session: &TenantSession<'_>,
        board: &Board,
        sprint: &Sprint,
        processed: &mut ProcessedSet,
        report: &mut PassReport,
    ) -> Result<()> {
        if self.settings.document_pass {
            let outcome = self.document_item(session, board, sprint, processed).await?;
            report.count(&outcome);
        }
        if self.settings.issue_pass {
            self.issue_items(session, board, sprint, processed, report).await?;
        }
        Ok(())
    }

    async fn document_item(
        &self,
        session: &TenantSession<'_>,
        board: &Board,
        sprint: &Sprint,
        processed: &mut ProcessedSet,
    ) -> Result<ItemOutcome> {
        let (url, page_id) = match parse_goal(sprint.goal_text()) {
            GoalLink::Document { url, page_id } => (url, page_id),
            GoalLink::NoGoal => {
                tracing::info!("Sprint '{}' on board '{}' has no goal. Skipping.", sprint.name, board.name);
                return Ok(ItemOutcome::Skipped(SkipReason::NoGoal));
            }
            GoalLink::NoDocumentLink => {
                tracing::info!("Sprint '{}' on board '{}' has no document link in goal. Skipping.", sprint.name, board.name);
                return Ok(ItemOutcome::Skipped(SkipReason::NoDocumentLink));
            }
            GoalLink::NoPageId { url } => {
                tracing::info!(%url, "Sprint '{}' on board '{}' has a document link but no page id. Skipping.", sprint.name, board.name);
                return Ok(ItemOutcome::Skipped(SkipReason::NoPageId));
            }
        };

        let key = ProcessedKey::document(page_id.as_str());
        if processed.contains(&key) {
            tracing::info!(
                "Sprint '{}' on board '{}': test cases already generated for page {page_id}. Skipping.",
                sprint.name,
                board.name
            );
            return Ok(ItemOutcome::Skipped(SkipReason::AlreadyProcessed));
        }

        let result = self
            .generate_for_document(session, board, sprint, &url, &page_id)
            .instrument(item_span("document", &page_id))
            .await;
        match result {
            Ok(()) => {
                self.record(processed, key).await?;
                Ok(ItemOutcome::Recorded)
            }
            Err(err) if err.is_pass_fatal() => Err(err),
            Err(err) => {
                tracing::warn!(kind = err.kind(), error = %err, "Sprint '{}' on board '{}' failed", sprint.name, board.name);
                session
                    .notify(&format!(
                        "Failed for *{}* on board *{}* ({}): {err}",
                        sprint.name, board.name, session.tenant.jira_base
                    ))
                    .await;
                Ok(ItemOutcome::Failed(err.to_string()))
            }
        }
    }

    async fn generate_for_document(
        &self,
        session: &TenantSession<'_>,
        board: &Board,
        sprint: &Sprint,
        url: &str,
        page_id: &str,
    ) -> Result<()> {
        let document_tenant = self.domains.resolve_url(url)?;
        let store = self.services.document_store(document_tenant)?;
        let text = store.fetch_page_text(page_id).await?;

        let path = self.settings.output_dir.join(document_file_name(&board.name, &sprint.name));
        let outcome = session.synthesizer.synthesize(&text, &path).await?;
        tracing::info!(test_cases = outcome.test_cases, file = %path.display(), "test cases written");

        let issues = session.tracker.list_issues(sprint.id).await?;
        if issues.is_empty() {
            tracing::info!("Sprint '{}' on board '{}': no issues found. Skipped attachment.", sprint.name, board.name);
            session
                .notify(&format!(
                    "⚠️ No issues found in *{}* (`{}`). Skipped attachment.",
                    sprint.name, board.name
                ))
                .await;
            return Ok(());
        }

        let mut attached = Vec::with_capacity(issues.len());
        for issue in &issues {
            session.tracker.attach(&issue.key, &path).await?;
            attached.push(issue.key.as_str());
        }
        session
            .notify(&format!(
                "✅ Test cases generated and attached to issues {} in *{}* (`{}`).",
                attached.join(", "),
                sprint.name,
                board.name
            ))
            .await;
        Ok(())
    }

    async fn issue_items(
        &self,
        session: &TenantSession<'_>,
        board: &Board,
        sprint: &Sprint,
        processed: &mut ProcessedSet,
        report: &mut PassReport,
    ) -> Result<()> {
        let issues = match session.tracker.list_issues(sprint.id).await {
            Ok(issues) => issues,
            Err(err) => {
                tracing::warn!(error = %err, "cannot list sprint issues");
                session
                    .notify(&format!(
                        "Failed to list issues of *{}* on board *{}* ({}): {err}",
                        sprint.name, board.name, session.tenant.jira_base
                    ))
                    .await;
                report.failed += 1;
                return Ok(());
            }
        };

        for issue in &issues {
            let outcome = self
                .issue_item(session, board, sprint, issue, processed)
                .instrument(item_span("issue", &issue.key))
                .await?;
            report.count(&outcome);
        }
        Ok(())
    }

    async fn issue_item(
        &self,
        session: &TenantSession<'_>,
        board: &Board,
        sprint: &Sprint,
        issue: &Issue,
        processed: &mut ProcessedSet,
    ) -> Result<ItemOutcome> {
        let text = match collect_issue_text(session.tracker.as_ref(), issue).await {
            Ok(text) => text,
            Err(err) => return self.issue_failed(session, board, sprint, issue, err).await,
        };
        if text.trim().is_empty() {
            tracing::info!(issue = %issue.key, "issue has no text. Skipping.");
            return Ok(ItemOutcome::Skipped(SkipReason::EmptyIssue));
        }

        let key = ProcessedKey::issue_content(content_hash(&text));
        if processed.contains(&key) {
            tracing::debug!(issue = %issue.key, "issue content unchanged since last generation. Skipping.");
            return Ok(ItemOutcome::Skipped(SkipReason::AlreadyProcessed));
        }

        match self.generate_for_issue(session, board, sprint, issue, &text).await {
            Ok(()) => {
                self.record(processed, key).await?;
                Ok(ItemOutcome::Recorded)
            }
            Err(err) => self.issue_failed(session, board, sprint, issue, err).await,
        }
    }

    async fn generate_for_issue(
        &self,
        session: &TenantSession<'_>,
        board: &Board,
        sprint: &Sprint,
        issue: &Issue,
        text: &str,
    ) -> Result<()> {
        let path = self.settings.output_dir.join(issue_file_name(&issue.key));
        let outcome = session.synthesizer.synthesize(text, &path).await?;
        tracing::info!(test_cases = outcome.test_cases, file = %path.display(), "test cases written");

        session.tracker.attach(&issue.key, &path).await?;
        session
            .notify(&format!(
                "✅ Test cases generated from issue content and attached to *{}* in *{}* (`{}`).",
                issue.key, sprint.name, board.name
            ))
            .await;
        Ok(())
    }

    async fn issue_failed(
        &self,
        session: &TenantSession<'_>,
        board: &Board,
        sprint: &Sprint,
        issue: &Issue,
        err: QaError,
    ) -> Result<ItemOutcome> {
        if err.is_pass_fatal() {
            return Err(err);
        }
        tracing::warn!(issue = %issue.key, kind = err.kind(), error = %err, "issue failed");
        session
            .notify(&format!(
                "Failed for issue *{}* in *{}* on board *{}* ({}): {err}",
                issue.key, sprint.name, board.name, session.tenant.jira_base
            ))
            .await;
        Ok(ItemOutcome::Failed(err.to_string()))
    }

    async fn record(&self, processed: &mut ProcessedSet, key: ProcessedKey) -> Result<()> {
        tracing::info!(%key, "recorded");
        processed.insert(key);
        self.ledger.save(processed).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_lookup_prefers_exact_name() {
        let boards = vec![
            Board { id: 1, name: "payments".into() },
            Board { id: 2, name: "Payments".into() },
        ];
        assert_eq!(find_board(&boards, "Payments").map(|b| b.id), Some(2));
        assert_eq!(find_board(&boards, " PAYMENTS ").map(|b| b.id), Some(1));
        assert!(find_board(&boards, "Search").is_none());
    }
}
