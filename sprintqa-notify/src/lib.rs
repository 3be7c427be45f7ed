//! # sprintqa-notify
//!
//! Posts status messages to an incoming chat webhook as `{"text": ...}`.
//! Message text may use Slack `mrkdwn` (`*bold*`, `` `code` ``).

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use sprintqa_core::{Notifier, QaError, Result, TenantConfig};
use std::time::Duration;
use tracing::instrument;
use url::Url;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Serialize)]
struct WebhookMessage<'a> {
    text: &'a str,
}

/// [`Notifier`] for a Slack-compatible incoming webhook.
#[derive(Clone)]
pub struct SlackWebhookNotifier {
    client: Client,
    webhook_url: Url,
}

impl std::fmt::Debug for SlackWebhookNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The webhook path is itself a credential.
        f.debug_struct("SlackWebhookNotifier")
            .field("host", &self.webhook_url.host_str())
            .finish_non_exhaustive()
    }
}

impl SlackWebhookNotifier {
    pub fn new(webhook_url: Url, timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|e| QaError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, webhook_url })
    }

    pub fn for_tenant(tenant: &TenantConfig, timeout: Option<Duration>) -> Result<Self> {
        Self::new(tenant.slack_webhook_url.clone(), timeout)
    }
}

#[async_trait]
impl Notifier for SlackWebhookNotifier {
    #[instrument(skip_all)]
    async fn notify(&self, message: &str) -> Result<()> {
        let response = self
            .client
            .post(self.webhook_url.clone())
            .json(&WebhookMessage { text: message })
            .send()
            .await
            .map_err(|e| QaError::Notify(format!("webhook request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QaError::Notify(format!("webhook returned {}: {}", status.as_u16(), body.trim())));
        }
        tracing::debug!("notification delivered");
        Ok(())
    }
}
