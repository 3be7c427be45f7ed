#![allow(dead_code)]

use async_trait::async_trait;
use sprintqa_core::{
    Board, DocumentStore, DomainConfig, Issue, IssueAttachment, Notifier, QaError, Result, Sprint,
    TenantConfig, TestCase, TestCaseGenerator, Tracker,
};
use sprintqa_ledger::{LedgerStore, ProcessedSet};
use sprintqa_runner::{Orchestrator, OrchestratorConfig, RunnerSettings, ServiceFactory};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const CONFIG: &str = r#"{
    "acme.atlassian.net": {
        "JIRA_EMAIL": "bot@acme.test",
        "JIRA_API_TOKEN": "token",
        "JIRA_BASE": "https://acme.atlassian.net",
        "CONFLUENCE_BASE": "https://acme.atlassian.net/wiki",
        "SLACK_WEBHOOK_URL": "https://hooks.slack.test/T0/B0",
        "GEMINI_API_KEY": "gem-key"
    }
}"#;

pub fn domains() -> Arc<DomainConfig> {
    Arc::new(DomainConfig::from_json_str(CONFIG, None).unwrap())
}

pub fn sprint(id: u64, name: &str, goal: Option<&str>) -> Sprint {
    Sprint {
        id,
        name: name.into(),
        goal: goal.map(str::to_string),
        state: Some("active".into()),
        origin_board_id: None,
    }
}

pub fn issue(key: &str, summary: &str, description: Option<&str>) -> Issue {
    Issue {
        key: key.into(),
        summary: summary.into(),
        description: description.map(str::to_string),
        attachments: Vec::new(),
    }
}

pub fn text_attachment(id: &str, size: u64) -> IssueAttachment {
    IssueAttachment {
        id: id.into(),
        filename: format!("{id}.txt"),
        mime_type: "text/plain".into(),
        size,
        content_url: format!("https://acme.atlassian.net/rest/api/3/attachment/content/{id}"),
    }
}

pub fn cases(n: usize) -> Vec<TestCase> {
    (1..=n)
        .map(|i| TestCase {
            scenario: format!("Scenario {i}"),
            test_case_id: format!("TC-{i:03}"),
            description: "d".into(),
            steps: vec!["step one".into(), "step two".into()],
            expected_result: "ok".into(),
        })
        .collect()
}

#[derive(Default)]
pub struct MockTracker {
    pub boards: Vec<Board>,
    pub sprints: HashMap<u64, Vec<Sprint>>,
    pub issues: HashMap<u64, Vec<Issue>>,
    pub attachment_texts: HashMap<String, String>,
    pub failing_sprint_boards: Vec<u64>,
    pub failing_attach: Vec<String>,
    pub attached: Mutex<Vec<(String, PathBuf)>>,
    pub downloads: Mutex<Vec<String>>,
}

impl MockTracker {
    pub fn attached(&self) -> Vec<(String, PathBuf)> {
        self.attached.lock().unwrap().clone()
    }
}

#[async_trait]
impl Tracker for MockTracker {
    async fn list_boards(&self) -> Result<Vec<Board>> {
        Ok(self.boards.clone())
    }

    async fn list_active_sprints(&self, board: &Board) -> Result<Vec<Sprint>> {
        if self.failing_sprint_boards.contains(&board.id) {
            return Err(QaError::Tracker("board does not support sprints".into()));
        }
        Ok(self.sprints.get(&board.id).cloned().unwrap_or_default())
    }

    async fn get_sprint(&self, sprint_id: u64) -> Result<Sprint> {
        self.sprints
            .values()
            .flatten()
            .find(|s| s.id == sprint_id)
            .cloned()
            .ok_or_else(|| QaError::Tracker(format!("sprint {sprint_id} not found")))
    }

    async fn list_issues(&self, sprint_id: u64) -> Result<Vec<Issue>> {
        Ok(self.issues.get(&sprint_id).cloned().unwrap_or_default())
    }

    async fn fetch_attachment_text(&self, attachment: &IssueAttachment) -> Result<String> {
        self.downloads.lock().unwrap().push(attachment.id.clone());
        self.attachment_texts
            .get(&attachment.id)
            .cloned()
            .ok_or_else(|| QaError::Fetch(format!("attachment {} missing", attachment.id)))
    }

    async fn attach(&self, issue_key: &str, file: &Path) -> Result<()> {
        if self.failing_attach.iter().any(|k| k == issue_key) {
            return Err(QaError::Attach(format!("{issue_key} rejected the upload")));
        }
        assert!(file.exists(), "attached file {} must exist", file.display());
        self.attached.lock().unwrap().push((issue_key.to_string(), file.to_path_buf()));
        Ok(())
    }
}

#[derive(Default)]
pub struct MockDocuments {
    pub pages: HashMap<String, String>,
    pub fetched: Mutex<Vec<String>>,
}

#[async_trait]
impl DocumentStore for MockDocuments {
    async fn fetch_page_text(&self, page_id: &str) -> Result<String> {
        self.fetched.lock().unwrap().push(page_id.to_string());
        self.pages
            .get(page_id)
            .cloned()
            .ok_or_else(|| QaError::Fetch(format!("page {page_id} returned 404")))
    }
}

pub struct MockGenerator {
    pub count: usize,
    pub malformed: bool,
    pub prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    pub fn returning(count: usize) -> Self {
        Self { count, malformed: false, prompts: Mutex::default() }
    }

    pub fn malformed() -> Self {
        Self { count: 0, malformed: true, prompts: Mutex::default() }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TestCaseGenerator for MockGenerator {
    async fn generate(&self, document_text: &str) -> Result<Vec<TestCase>> {
        self.prompts.lock().unwrap().push(document_text.to_string());
        if self.malformed {
            return sprintqa_testcase::parse_test_cases(r#"[{"Scenario": "incomplete"}]"#);
        }
        Ok(cases(self.count))
    }
}

#[derive(Default)]
pub struct MockNotifier {
    pub messages: Mutex<Vec<String>>,
}

impl MockNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, message: &str) -> Result<()> {
        self.messages.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

/// Ledger that accepts loads but rejects every save.
pub struct ReadOnlyLedger;

#[async_trait]
impl LedgerStore for ReadOnlyLedger {
    async fn load(&self) -> ProcessedSet {
        ProcessedSet::new()
    }

    async fn save(&self, _set: &ProcessedSet) -> Result<()> {
        Err(QaError::Ledger("disk is read-only".into()))
    }
}

/// Hands the same mocks to every tenant.
pub struct MockServices {
    pub tracker: Arc<MockTracker>,
    pub documents: Arc<MockDocuments>,
    pub generator: Arc<MockGenerator>,
    pub notifier: Arc<MockNotifier>,
}

impl ServiceFactory for MockServices {
    fn tracker(&self, _tenant: &TenantConfig) -> Result<Arc<dyn Tracker>> {
        Ok(self.tracker.clone())
    }

    fn document_store(&self, _tenant: &TenantConfig) -> Result<Arc<dyn DocumentStore>> {
        Ok(self.documents.clone())
    }

    fn generator(&self, _tenant: &TenantConfig) -> Result<Arc<dyn TestCaseGenerator>> {
        Ok(self.generator.clone())
    }

    fn notifier(&self, _tenant: &TenantConfig) -> Result<Arc<dyn Notifier>> {
        Ok(self.notifier.clone())
    }
}

pub struct Harness {
    pub services: Arc<MockServices>,
    pub orchestrator: Orchestrator,
    pub output: tempfile::TempDir,
}

impl Harness {
    pub fn new(
        tracker: MockTracker,
        documents: MockDocuments,
        generator: MockGenerator,
        ledger: Arc<dyn LedgerStore>,
        settings: RunnerSettings,
    ) -> Self {
        let output = tempfile::tempdir().unwrap();
        let services = Arc::new(MockServices {
            tracker: Arc::new(tracker),
            documents: Arc::new(documents),
            generator: Arc::new(generator),
            notifier: Arc::new(MockNotifier::default()),
        });
        let orchestrator = Orchestrator::new(OrchestratorConfig {
            domains: domains(),
            services: services.clone(),
            ledger,
            settings: settings.with_output_dir(output.path()),
        });
        Self { services, orchestrator, output }
    }

    pub fn fetched(&self) -> Vec<String> {
        self.services.documents.fetched.lock().unwrap().clone()
    }
}
