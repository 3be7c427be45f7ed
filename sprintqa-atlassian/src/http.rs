use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use sprintqa_core::{QaError, Result};
use std::time::Duration;
use url::Url;

/// Default per-request timeout for tracker and document-store calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error constructor for a given call site, e.g. `QaError::Tracker`.
pub(crate) type ErrorKind = fn(String) -> QaError;

/// Basic-auth HTTP session shared by the tracker and document-store clients.
#[derive(Clone)]
pub(crate) struct BasicAuthHttp {
    client: Client,
    email: String,
    api_token: String,
}

impl std::fmt::Debug for BasicAuthHttp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthHttp").field("email", &self.email).finish_non_exhaustive()
    }
}

impl BasicAuthHttp {
    pub fn new(email: &str, api_token: &str, timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|e| QaError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, email: email.to_string(), api_token: api_token.to_string() })
    }

    pub fn get(&self, url: Url) -> RequestBuilder {
        self.client
            .get(url)
            .basic_auth(&self.email, Some(&self.api_token))
            .header(reqwest::header::ACCEPT, "application/json")
    }

    pub fn post(&self, url: Url) -> RequestBuilder {
        self.client.post(url).basic_auth(&self.email, Some(&self.api_token))
    }

    /// Send `request` and return the response if its status is a success.
    pub async fn send(&self, request: RequestBuilder, kind: ErrorKind) -> Result<Response> {
        let response = request.send().await.map_err(|e| kind(format!("request failed: {e}")))?;
        check_response(response, kind).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: Url, kind: ErrorKind) -> Result<T> {
        let response = self.send(self.get(url.clone()), kind).await?;
        response.json::<T>().await.map_err(|e| kind(format!("invalid response from {url}: {e}")))
    }
}

pub(crate) async fn check_response(response: Response, kind: ErrorKind) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    Err(kind(format!("{url} returned {}: {}", status.as_u16(), body.trim())))
}

/// Base URL with a trailing slash so relative paths join beneath it.
pub(crate) fn directory_url(base: &Url) -> Url {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

pub(crate) fn endpoint(base: &Url, path: &str, kind: ErrorKind) -> Result<Url> {
    base.join(path).map_err(|e| kind(format!("cannot build URL for '{path}': {e}")))
}
