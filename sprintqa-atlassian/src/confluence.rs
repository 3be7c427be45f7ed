use async_trait::async_trait;
use sprintqa_core::{DocumentStore, QaError, Result, TenantConfig};
use std::time::Duration;
use tracing::instrument;
use url::Url;

use crate::html::strip_markup;
use crate::http::{BasicAuthHttp, directory_url, endpoint};
use crate::wire::PageContent;

/// [`DocumentStore`] reading Confluence pages in storage format.
///
/// Authenticates with the tenant's tracker credentials.
#[derive(Debug, Clone)]
pub struct ConfluenceClient {
    http: BasicAuthHttp,
    base_url: Url,
}

impl ConfluenceClient {
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
        Self::new(&tenant.confluence_base, &tenant.jira_email, &tenant.jira_api_token, timeout)
    }

    /// Raw storage-format body of a page.
    pub async fn fetch_storage(&self, page_id: &str) -> Result<String> {
        let mut url = endpoint(&self.base_url, &format!("rest/api/content/{page_id}"), QaError::Fetch)?;
        url.query_pairs_mut().append_pair("expand", "body.storage");
        let page: PageContent = self.http.get_json(url, QaError::Fetch).await?;
        page.storage_value()
            .ok_or_else(|| QaError::Fetch(format!("page {page_id} has no storage body")))
    }
}

#[async_trait]
impl DocumentStore for ConfluenceClient {
    #[instrument(skip(self))]
    async fn fetch_page_text(&self, page_id: &str) -> Result<String> {
        let storage = self.fetch_storage(page_id).await?;
        let text = strip_markup(&storage);
        tracing::debug!(chars = text.len(), "fetched page");
        Ok(text)
    }
}
