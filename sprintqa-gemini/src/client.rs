use reqwest::{Client, Response};
use serde_json::Value;
use snafu::ResultExt;
use tracing::instrument;
use url::Url;

use crate::common::Model;
use crate::error::{
    BadResponseSnafu, ConstructUrlSnafu, DecodeResponseSnafu, Error, PerformRequestSnafu,
};
use crate::model::{Content, GenerateContentRequest, GenerationConfig, GenerationResponse};

async fn check_response(response: Response) -> Result<Response, Error> {
    let status = response.status();
    if !status.is_success() {
        let description = response.text().await.ok();
        BadResponseSnafu { code: status.as_u16(), description }.fail()
    } else {
        Ok(response)
    }
}

/// Client for the generative-language REST API.
///
/// The API key travels in the default `x-goog-api-key` header of the inner
/// HTTP client, see [`GeminiBuilder`](crate::GeminiBuilder).
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http_client: Client,
    base_url: Url,
    model: Model,
}

impl GeminiClient {
    /// Create a client for the default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        crate::GeminiBuilder::new(api_key).build()
    }

    pub(crate) fn from_parts(http_client: Client, base_url: Url, model: Model) -> Self {
        Self { http_client, base_url, model }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    fn build_url(&self, endpoint: &str) -> Result<Url, Error> {
        let suffix =
            format!("models/{}:{}", self.model.as_str().trim_start_matches("models/"), endpoint);
        self.base_url.join(&suffix).context(ConstructUrlSnafu { suffix })
    }

    /// Start building a `generateContent` request.
    pub fn generate_content(&self) -> ContentBuilder<'_> {
        ContentBuilder { client: self, contents: Vec::new(), config: GenerationConfig::default() }
    }

    #[instrument(skip_all, fields(model = %self.model))]
    pub async fn execute(&self, request: &GenerateContentRequest) -> Result<GenerationResponse, Error> {
        let url = self.build_url("generateContent")?;
        let response = self
            .http_client
            .post(url.clone())
            .json(request)
            .send()
            .await
            .context(PerformRequestSnafu { url })?;
        let response = check_response(response).await?;
        let parsed: GenerationResponse = response.json().await.context(DecodeResponseSnafu)?;

        tracing::debug!(
            candidates = parsed.candidates.len(),
            model_version = parsed.model_version.as_deref().unwrap_or("unknown"),
            "generateContent completed"
        );
        Ok(parsed)
    }
}

/// Fluent builder for a single `generateContent` call.
pub struct ContentBuilder<'a> {
    client: &'a GeminiClient,
    contents: Vec<Content>,
    config: GenerationConfig,
}

impl ContentBuilder<'_> {
    pub fn with_user_message(mut self, text: impl Into<String>) -> Self {
        self.contents.push(Content::user(text));
        self
    }

    pub fn with_response_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.config.response_mime_type = Some(mime_type.into());
        self
    }

    pub fn with_response_schema(mut self, schema: Value) -> Self {
        self.config.response_schema = Some(schema);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    pub fn build(self) -> GenerateContentRequest {
        let generation_config = (self.config != GenerationConfig::default()).then_some(self.config);
        GenerateContentRequest { contents: self.contents, system_instruction: None, generation_config }
    }

    pub async fn execute(self) -> Result<GenerationResponse, Error> {
        let client = self.client;
        let request = self.build();
        client.execute(&request).await
    }
}
