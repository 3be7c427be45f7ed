use sprintqa_atlassian::{ConfluenceClient, JiraClient};
use sprintqa_core::{DocumentStore, Notifier, Result, TenantConfig, TestCaseGenerator, Tracker};
use sprintqa_notify::SlackWebhookNotifier;
use sprintqa_testcase::GeminiTestCaseGenerator;
use std::sync::Arc;
use std::time::Duration;

/// Builds the external-service clients for a tenant.
pub trait ServiceFactory: Send + Sync {
    fn tracker(&self, tenant: &TenantConfig) -> Result<Arc<dyn Tracker>>;
    fn document_store(&self, tenant: &TenantConfig) -> Result<Arc<dyn DocumentStore>>;
    fn generator(&self, tenant: &TenantConfig) -> Result<Arc<dyn TestCaseGenerator>>;
    fn notifier(&self, tenant: &TenantConfig) -> Result<Arc<dyn Notifier>>;
}

/// Production factory: REST clients for the tracker, document store,
/// generative endpoint and chat webhook.
#[derive(Debug, Clone, Default)]
pub struct HttpServiceFactory {
    timeout: Option<Duration>,
}

impl HttpServiceFactory {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl ServiceFactory for HttpServiceFactory {
    fn tracker(&self, tenant: &TenantConfig) -> Result<Arc<dyn Tracker>> {
        Ok(Arc::new(JiraClient::for_tenant(tenant, self.timeout)?))
    }

    fn document_store(&self, tenant: &TenantConfig) -> Result<Arc<dyn DocumentStore>> {
        Ok(Arc::new(ConfluenceClient::for_tenant(tenant, self.timeout)?))
    }

    fn generator(&self, tenant: &TenantConfig) -> Result<Arc<dyn TestCaseGenerator>> {
        Ok(Arc::new(GeminiTestCaseGenerator::for_tenant(tenant, self.timeout)?))
    }

    fn notifier(&self, tenant: &TenantConfig) -> Result<Arc<dyn Notifier>> {
        Ok(Arc::new(SlackWebhookNotifier::for_tenant(tenant, self.timeout)?))
    }
}
