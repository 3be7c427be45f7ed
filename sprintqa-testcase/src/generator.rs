use async_trait::async_trait;
use sprintqa_core::{QaError, Result, TenantConfig, TestCase, TestCaseGenerator};
use sprintqa_gemini::{ClientError, GeminiBuilder, GeminiClient};
use std::time::Duration;
use url::Url;

use crate::prompt::{REQUESTED_CASES, build_prompt};
use crate::schema::{parse_test_cases, response_schema};

/// Default model when a tenant does not name one.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

fn synthesis_error(err: ClientError) -> QaError {
    match err {
        ClientError::BadResponse { code, description } => QaError::Synthesis(format!(
            "generative endpoint returned {code}: {}",
            description.as_deref().unwrap_or("no body")
        )),
        ClientError::DecodeResponse { source } => {
            QaError::Parse(format!("generative endpoint returned an unreadable body: {source}"))
        }
        other => QaError::Synthesis(other.to_string()),
    }
}

/// [`TestCaseGenerator`] backed by a structured-output Gemini call.
#[derive(Debug, Clone)]
pub struct GeminiTestCaseGenerator {
    client: GeminiClient,
}

impl GeminiTestCaseGenerator {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    /// Build a generator from a tenant's key and optional model override.
    pub fn for_tenant(tenant: &TenantConfig, timeout: Option<Duration>) -> Result<Self> {
        Self::with_base_url(tenant, None, timeout)
    }

    pub fn with_base_url(
        tenant: &TenantConfig,
        base_url: Option<Url>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = GeminiBuilder::new(tenant.gemini_api_key.clone())
            .with_model(tenant.gemini_model.as_deref().unwrap_or(DEFAULT_MODEL));
        if let Some(base_url) = base_url {
            builder = builder.with_base_url(base_url);
        }
        if let Some(timeout) = timeout {
            builder = builder.with_timeout(timeout);
        }
        let client = builder.build().map_err(|e| QaError::Config(e.to_string()))?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl TestCaseGenerator for GeminiTestCaseGenerator {
    async fn generate(&self, document_text: &str) -> Result<Vec<TestCase>> {
        let response = self
            .client
            .generate_content()
            .with_user_message(build_prompt(document_text))
            .with_response_mime_type("application/json")
            .with_response_schema(response_schema())
            .execute()
            .await
            .map_err(synthesis_error)?;

        let Some(text) = response.first_text() else {
            let reason = response
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.clone())
                .or_else(|| response.candidates.first().and_then(|c| c.finish_reason.clone()))
                .unwrap_or_else(|| "no candidates".to_string());
            return Err(QaError::Synthesis(format!("model returned no text ({reason})")));
        };

        let cases = parse_test_cases(text)?;
        let (min, max) = REQUESTED_CASES;
        if !(min..=max).contains(&cases.len()) {
            tracing::warn!(count = cases.len(), min, max, "model returned an unexpected number of test cases");
        }
        Ok(cases)
    }
}
