use reqwest::ClientBuilder;
use reqwest::header::{HeaderMap, HeaderValue};
use snafu::ResultExt;
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

use crate::client::GeminiClient;
use crate::common::Model;
use crate::error::{BuildClientSnafu, Error, InvalidApiKeySnafu};

static DEFAULT_BASE_URL: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("https://generativelanguage.googleapis.com/v1beta/")
        .expect("unreachable error: failed to parse default base URL")
});

/// A builder for [`GeminiClient`].
pub struct GeminiBuilder {
    api_key: String,
    model: Model,
    client_builder: ClientBuilder,
    base_url: Url,
}

impl GeminiBuilder {
    /// Creates a new `GeminiBuilder` with the given API key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            api_key: key.into(),
            model: Model::default(),
            client_builder: ClientBuilder::default(),
            base_url: DEFAULT_BASE_URL.clone(),
        }
    }

    pub fn with_model(mut self, model: impl Into<Model>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets a custom `reqwest::ClientBuilder`.
    pub fn with_http_client(mut self, client_builder: ClientBuilder) -> Self {
        self.client_builder = client_builder;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client_builder = self.client_builder.timeout(timeout);
        self
    }

    /// Sets a custom base URL for the API. A trailing slash is added if missing
    /// so that model paths join beneath it.
    pub fn with_base_url(mut self, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        self.base_url = base_url;
        self
    }

    pub fn build(self) -> Result<GeminiClient, Error> {
        if self.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }

        let mut api_key = HeaderValue::from_str(&self.api_key).context(InvalidApiKeySnafu)?;
        api_key.set_sensitive(true);
        let headers = HeaderMap::from_iter([(
            reqwest::header::HeaderName::from_static("x-goog-api-key"),
            api_key,
        )]);

        let http_client =
            self.client_builder.default_headers(headers).build().context(BuildClientSnafu)?;

        Ok(GeminiClient::from_parts(http_client, self.base_url, self.model))
    }
}
