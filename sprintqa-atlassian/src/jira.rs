use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use sprintqa_core::{
    Board, Issue, IssueAttachment, QaError, Result, Sprint, TenantConfig, Tracker,
};
use std::path::Path;
use std::time::Duration;
use tracing::instrument;
use url::Url;

use crate::http::{BasicAuthHttp, directory_url, endpoint};
use crate::wire::{IssuePage, ValuesPage, WireBoard};

/// Page size requested from every paginated listing.
pub const PAGE_SIZE: u64 = 50;

const ISSUE_FIELDS: &str = "summary,description,attachment";
const XLSX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn mime_for(file: &Path) -> &'static str {
    match file.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("xlsx") => XLSX_MIME_TYPE,
        _ => "application/octet-stream",
    }
}

/// [`Tracker`] backed by the Jira agile and platform REST APIs.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: BasicAuthHttp,
    base_url: Url,
}

impl JiraClient {
    pub fn new(
        base_url: &Url,
        email: &str,
        api_token: &str,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        Ok(Self {
            http: BasicAuthHttp::new(email, api_token, timeout)?,
            base_url: directory_url(base_url),
        })
    }

    pub fn for_tenant(tenant: &TenantConfig, timeout: Option<Duration>) -> Result<Self> {
        Self::new(&tenant.jira_base, &tenant.jira_email, &tenant.jira_api_token, timeout)
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = endpoint(&self.base_url, path, QaError::Tracker)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Drain a `values` listing page by page.
    async fn collect_values<T, F>(&self, path: &str, extra: &[(&str, String)], map: F) -> Result<Vec<T>>
    where
        F: Fn(serde_json::Value) -> Result<T>,
    {
        let mut items = Vec::new();
        let mut start_at = 0u64;
        loop {
            let mut query = vec![("startAt", start_at.to_string()), ("maxResults", PAGE_SIZE.to_string())];
            query.extend(extra.iter().cloned());
            let page: ValuesPage<serde_json::Value> =
                self.http.get_json(self.url(path, &query)?, QaError::Tracker).await?;

            let fetched = page.values.len() as u64;
            for value in page.values {
                items.push(map(value)?);
            }
            if fetched == 0 || page.is_last.unwrap_or(true) {
                break;
            }
            start_at += page.max_results.filter(|m| *m > 0).unwrap_or(fetched);
        }
        Ok(items)
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| QaError::Tracker(format!("unexpected payload: {e}")))
}

#[async_trait]
impl Tracker for JiraClient {
    #[instrument(skip_all)]
    async fn list_boards(&self) -> Result<Vec<Board>> {
        let boards = self
            .collect_values("rest/agile/1.0/board", &[], |v| decode::<WireBoard>(v).map(Board::from))
            .await?;
        tracing::debug!(count = boards.len(), "listed boards");
        Ok(boards)
    }

    #[instrument(skip_all, fields(board.id = board.id, board.name = %board.name))]
    async fn list_active_sprints(&self, board: &Board) -> Result<Vec<Sprint>> {
        let path = format!("rest/agile/1.0/board/{}/sprint", board.id);
        self.collect_values(&path, &[("state", "active".to_string())], decode::<Sprint>).await
    }

    #[instrument(skip(self))]
    async fn get_sprint(&self, sprint_id: u64) -> Result<Sprint> {
        let url = self.url(&format!("rest/agile/1.0/sprint/{sprint_id}"), &[])?;
        self.http.get_json(url, QaError::Tracker).await
    }

    #[instrument(skip(self))]
    async fn list_issues(&self, sprint_id: u64) -> Result<Vec<Issue>> {
        let path = format!("rest/agile/1.0/sprint/{sprint_id}/issue");
        let mut issues = Vec::new();
        let mut start_at = 0u64;
        loop {
            let query = [
                ("startAt", start_at.to_string()),
                ("maxResults", PAGE_SIZE.to_string()),
                ("fields", ISSUE_FIELDS.to_string()),
            ];
            let page: IssuePage = self.http.get_json(self.url(&path, &query)?, QaError::Tracker).await?;

            let fetched = page.issues.len() as u64;
            issues.extend(page.issues.into_iter().map(Issue::from));
            start_at += fetched;
            let exhausted = page.total.is_some_and(|total| start_at >= total);
            if fetched == 0 || exhausted || page.is_last == Some(true) {
                break;
            }
        }
        tracing::debug!(count = issues.len(), "listed sprint issues");
        Ok(issues)
    }

    #[instrument(skip_all, fields(attachment = %attachment.filename))]
    async fn fetch_attachment_text(&self, attachment: &IssueAttachment) -> Result<String> {
        let url = Url::parse(&attachment.content_url)
            .map_err(|e| QaError::InvalidUrl(format!("{}: {e}", attachment.content_url)))?;
        let response = self.http.send(self.http.get(url), QaError::Fetch).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| QaError::Fetch(format!("failed to read attachment {}: {e}", attachment.id)))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    #[instrument(skip(self, file), fields(file = %file.display()))]
    async fn attach(&self, issue_key: &str, file: &Path) -> Result<()> {
        let bytes = tokio::fs::read(file)
            .await
            .map_err(|e| QaError::Attach(format!("cannot read {}: {e}", file.display())))?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_for(file))
            .map_err(|e| QaError::Attach(e.to_string()))?;

        let url = endpoint(
            &self.base_url,
            &format!("rest/api/3/issue/{issue_key}/attachments"),
            QaError::Attach,
        )?;
        let request = self
            .http
            .post(url)
            .header("X-Atlassian-Token", "no-check")
            .multipart(Form::new().part("file", part));
        self.http.send(request, QaError::Attach).await?;
        tracing::info!(issue = issue_key, "attached file");
        Ok(())
    }
}
