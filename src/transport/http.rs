//! Authenticated HTTP transport for the Slack Web API
//!
//! Wraps reqwest::Client with bearer-token injection.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use super::{Files, Transport};
use crate::config::Config;
use crate::models::Params;

pub(crate) const DEFAULT_BASE_URL: &str = "https://slack.com/api";

/// Transport that POSTs each method to `{base_url}/{method}`.
pub struct HttpTransport {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl HttpTransport {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Build from configuration. Fails when no token is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let token = config
            .token
            .clone()
            .context("No API token. Set SLACK_API_TOKEN or add `token` to config.toml.")?;
        Ok(Self::new(token).with_base_url(config.base_url()))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn multipart(files: &Files) -> Result<Form> {
        let mut form = Form::new();
        for (field, path) in files {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read upload {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| field.clone());
            form = form.part(field.clone(), Part::bytes(bytes).file_name(file_name));
        }
        Ok(form)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn api_call(
        &self,
        method: &str,
        files: Option<&Files>,
        params: &Params,
    ) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, method);
        tracing::debug!("Slack POST {}", url);

        let mut req = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .query(&params.to_pairs());
        if let Some(files) = files.filter(|f| !f.is_empty()) {
            req = req.multipart(Self::multipart(files).await?);
        }

        let resp = req
            .send()
            .await
            .with_context(|| format!("Slack POST {} failed", url))?;
        let resp = check_response(resp, &url).await?;

        resp.json()
            .await
            .with_context(|| format!("Failed to parse response from {}", url))
    }
}

/// Check HTTP response status code and return a clear error on failure.
async fn check_response(resp: reqwest::Response, url: &str) -> Result<reqwest::Response> {
    let status = resp.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("?")
            .to_string();
        bail!("429 Too Many Requests for {} (retry after {}s)", url, retry_after);
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        bail!("HTTP {} for {}: {}", status.as_u16(), url, body);
    }
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let transport = HttpTransport::new("xoxb-1").with_base_url("http://localhost:9/api/");
        assert_eq!(transport.base_url, "http://localhost:9/api");
    }

    #[test]
    fn test_from_config_requires_token() {
        let config = Config::default();
        assert!(HttpTransport::from_config(&config).is_err());

        let config = Config {
            token: Some("xoxb-1".to_string()),
            ..Config::default()
        };
        let transport = HttpTransport::from_config(&config).unwrap();
        assert_eq!(transport.base_url, DEFAULT_BASE_URL);
    }
}
