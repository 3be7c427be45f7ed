//! Tenant configuration and the host-based resolver.
//!
//! The configuration file maps a tenant host to its credential bundle:
//!
//! ```json
//! {
//!   "acme.atlassian.net": {
//!     "JIRA_EMAIL": "qa-bot@acme.test",
//!     "JIRA_API_TOKEN": "…",
//!     "JIRA_BASE": "https://acme.atlassian.net",
//!     "CONFLUENCE_BASE": "https://acme.atlassian.net/wiki",
//!     "SLACK_WEBHOOK_URL": "https://hooks.slack.com/services/…",
//!     "GEMINI_API_KEY": "…"
//!   }
//! }
//! ```

use crate::error::{QaError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use url::Url;

/// Environment variables consulted when a tenant omits `GEMINI_API_KEY`.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

#[derive(Deserialize)]
struct RawTenantConfig {
    #[serde(rename = "JIRA_EMAIL", alias = "jira_email")]
    jira_email: Option<String>,
    #[serde(rename = "JIRA_API_TOKEN", alias = "jira_api_token")]
    jira_api_token: Option<String>,
    #[serde(rename = "JIRA_BASE", alias = "jira_base")]
    jira_base: Option<String>,
    #[serde(rename = "CONFLUENCE_BASE", alias = "confluence_base")]
    confluence_base: Option<String>,
    #[serde(rename = "SLACK_WEBHOOK_URL", alias = "slack_webhook_url")]
    slack_webhook_url: Option<String>,
    #[serde(rename = "GEMINI_API_KEY", alias = "gemini_api_key", default)]
    gemini_api_key: Option<String>,
    #[serde(rename = "GEMINI_MODEL", alias = "gemini_model", default)]
    gemini_model: Option<String>,
}

/// Credentials and endpoints for one tenant. Immutable once loaded.
#[derive(Clone, PartialEq, Eq)]
pub struct TenantConfig {
    pub host: String,
    pub jira_email: String,
    pub jira_api_token: String,
    pub jira_base: Url,
    pub confluence_base: Url,
    pub slack_webhook_url: Url,
    pub gemini_api_key: String,
    pub gemini_model: Option<String>,
}

impl fmt::Debug for TenantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantConfig")
            .field("host", &self.host)
            .field("jira_email", &self.jira_email)
            .field("jira_api_token", &"<redacted>")
            .field("jira_base", &self.jira_base.as_str())
            .field("confluence_base", &self.confluence_base.as_str())
            .field("slack_webhook_url", &"<redacted>")
            .field("gemini_api_key", &"<redacted>")
            .field("gemini_model", &self.gemini_model)
            .finish()
    }
}

fn required(host: &str, field: &str, value: Option<String>) -> Result<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(QaError::Config(format!("tenant '{host}' is missing required field {field}"))),
    }
}

fn required_url(host: &str, field: &str, value: Option<String>) -> Result<Url> {
    let raw = required(host, field, value)?;
    Url::parse(&raw).map_err(|e| {
        QaError::Config(format!("tenant '{host}' has an invalid {field} '{raw}': {e}"))
    })
}

impl TenantConfig {
    fn from_raw(host: &str, raw: RawTenantConfig, fallback_api_key: Option<&str>) -> Result<Self> {
        let gemini_api_key = raw
            .gemini_api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| fallback_api_key.map(str::to_string));

        Ok(Self {
            host: host.to_ascii_lowercase(),
            jira_email: required(host, "JIRA_EMAIL", raw.jira_email)?,
            jira_api_token: required(host, "JIRA_API_TOKEN", raw.jira_api_token)?,
            jira_base: required_url(host, "JIRA_BASE", raw.jira_base)?,
            confluence_base: required_url(host, "CONFLUENCE_BASE", raw.confluence_base)?,
            slack_webhook_url: required_url(host, "SLACK_WEBHOOK_URL", raw.slack_webhook_url)?,
            gemini_api_key: required(host, "GEMINI_API_KEY", gemini_api_key)?,
            gemini_model: raw.gemini_model.filter(|m| !m.trim().is_empty()),
        })
    }
}

/// All configured tenants, keyed by host.
#[derive(Debug, Clone, Default)]
pub struct DomainConfig {
    tenants: BTreeMap<String, TenantConfig>,
}

impl DomainConfig {
    /// Load the tenant map from a JSON file, falling back to the API key
    /// environment variables for tenants that do not carry their own key.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            QaError::Config(format!("cannot read configuration file {}: {e}", path.display()))
        })?;
        let fallback = API_KEY_ENV_VARS
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()));
        Self::from_json_str(&raw, fallback.as_deref())
    }

    pub fn from_json_str(json: &str, fallback_api_key: Option<&str>) -> Result<Self> {
        let raw: BTreeMap<String, RawTenantConfig> = serde_json::from_str(json)
            .map_err(|e| QaError::Config(format!("malformed configuration: {e}")))?;

        if raw.is_empty() {
            return Err(QaError::Config("configuration defines no tenants".to_string()));
        }

        let mut tenants = BTreeMap::new();
        for (host, entry) in raw {
            let tenant = TenantConfig::from_raw(&host, entry, fallback_api_key)?;
            tenants.insert(tenant.host.clone(), tenant);
        }
        Ok(Self { tenants })
    }

    pub fn from_tenants(tenants: impl IntoIterator<Item = TenantConfig>) -> Self {
        Self { tenants: tenants.into_iter().map(|t| (t.host.clone(), t)).collect() }
    }

    pub fn get(&self, host: &str) -> Option<&TenantConfig> {
        self.tenants.get(&host.to_ascii_lowercase())
    }

    /// Tenants in host order.
    pub fn tenants(&self) -> impl Iterator<Item = &TenantConfig> {
        self.tenants.values()
    }

    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }

    /// Resolve the tenant owning `url` by its host component.
    pub fn resolve_url(&self, url: &str) -> Result<&TenantConfig> {
        let host = host_of(url)?;
        self.get(&host).ok_or(QaError::ConfigNotFound(host))
    }
}

/// Extract the lower-cased host of an absolute URL.
pub fn host_of(url: &str) -> Result<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
        .filter(|h| !h.is_empty())
        .ok_or_else(|| QaError::InvalidUrl(format!("could not extract a host from '{url}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "acme.atlassian.net": {
            "JIRA_EMAIL": "bot@acme.test",
            "JIRA_API_TOKEN": "token",
            "JIRA_BASE": "https://acme.atlassian.net",
            "CONFLUENCE_BASE": "https://acme.atlassian.net/wiki",
            "SLACK_WEBHOOK_URL": "https://hooks.slack.test/T000/B000",
            "GEMINI_API_KEY": "gem-key"
        }
    }"#;

    #[test]
    fn resolves_tenant_by_host() {
        let config = DomainConfig::from_json_str(CONFIG, None).unwrap();
        let tenant = config.resolve_url("https://acme.atlassian.net/wiki/pages/12345").unwrap();
        assert_eq!(tenant.host, "acme.atlassian.net");
        assert_eq!(tenant.gemini_api_key, "gem-key");
    }

    #[test]
    fn resolution_ignores_host_case() {
        let config = DomainConfig::from_json_str(CONFIG, None).unwrap();
        assert!(config.resolve_url("https://ACME.atlassian.net/wiki/x").is_ok());
    }

    #[test]
    fn unknown_host_is_config_not_found() {
        let config = DomainConfig::from_json_str(CONFIG, None).unwrap();
        let err = config.resolve_url("https://other.atlassian.net/wiki/1").unwrap_err();
        assert!(matches!(err, QaError::ConfigNotFound(h) if h == "other.atlassian.net"));
    }

    #[test]
    fn hostless_url_is_invalid() {
        let config = DomainConfig::from_json_str(CONFIG, None).unwrap();
        assert!(matches!(config.resolve_url("not a url"), Err(QaError::InvalidUrl(_))));
        assert!(matches!(config.resolve_url("mailto:qa@acme.test"), Err(QaError::InvalidUrl(_))));
    }

    #[test]
    fn missing_field_is_rejected() {
        let json = r#"{"acme.atlassian.net": {"JIRA_EMAIL": "bot@acme.test"}}"#;
        let err = DomainConfig::from_json_str(json, Some("k")).unwrap_err();
        assert!(err.to_string().contains("JIRA_API_TOKEN"));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(DomainConfig::from_json_str("{", None), Err(QaError::Config(_))));
        assert!(matches!(DomainConfig::from_json_str("{}", None), Err(QaError::Config(_))));
    }

    #[test]
    fn api_key_falls_back_when_absent() {
        let json = CONFIG
            .replace("\"GEMINI_API_KEY\": \"gem-key\"", "\"GEMINI_MODEL\": \"gemini-2.0-flash\"");
        let config = DomainConfig::from_json_str(&json, Some("env-key")).unwrap();
        let tenant = config.get("acme.atlassian.net").unwrap();
        assert_eq!(tenant.gemini_api_key, "env-key");
        assert_eq!(tenant.gemini_model.as_deref(), Some("gemini-2.0-flash"));

        assert!(DomainConfig::from_json_str(&json, None).is_err());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = DomainConfig::from_json_str(CONFIG, None).unwrap();
        let rendered = format!("{:?}", config.get("acme.atlassian.net").unwrap());
        assert!(!rendered.contains("gem-key"));
        assert!(!rendered.contains("\"token\""));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, CONFIG).unwrap();
        let config = DomainConfig::load(&path).unwrap();
        assert_eq!(config.len(), 1);

        assert!(DomainConfig::load(dir.path().join("absent.json")).is_err());
    }
}
