//! Base client: owns the transport and normalizes arguments

use std::sync::Arc;

use async_trait::async_trait;

use super::ApiCall;
use crate::config::Config;
use crate::error::Result;
use crate::models::{Params, Record};
use crate::transport::{Files, HttpTransport, Transport};

/// Client that sends every call straight to the transport.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl Client {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Client over [`HttpTransport`] built from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(HttpTransport::from_config(config)?))
    }
}

#[async_trait]
impl ApiCall for Client {
    async fn api_call(
        &self,
        method: &str,
        files: Option<&Files>,
        params: Params,
    ) -> Result<Record> {
        let params = params.normalized();
        tracing::debug!(method, ?params, "api_call");
        let payload = self.transport.api_call(method, files, &params).await?;
        Record::from_value(payload)
    }

    async fn call_method(&self, method: &str, params: Params) -> Result<Record> {
        tracing::debug!(method, ?params, "call_method");
        let payload = self.transport.api_call(method, None, &params).await?;
        Record::from_value(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_api_call_normalizes_booleans() {
        let mock = MockTransport::new();
        mock.respond("chat.postMessage", json!({"ok": true, "ts": "1.0"}));
        let client = Client::new(mock.clone());

        let params = Params::new()
            .with("channel", "C1")
            .with("as_user", true)
            .with("unfurl_links", false);
        let rec = client.api_call("chat.postMessage", None, params).await.unwrap();
        assert_eq!(rec.str_field("ts"), Some("1.0"));

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].params.get("as_user"), Some(&json!(1)));
        assert_eq!(calls[0].params.get("unfurl_links"), Some(&json!(0)));
    }

    #[tokio::test]
    async fn test_api_call_does_not_check_ok() {
        let mock = MockTransport::new();
        mock.respond("channels.info", json!({"ok": false, "error": "nope"}));
        let client = Client::new(mock);

        let rec = client
            .api_call("channels.info", None, Params::new())
            .await
            .unwrap();
        assert!(!rec.is_ok());
    }

    #[tokio::test]
    async fn test_call_method_passes_params_verbatim() {
        let mock = MockTransport::new();
        mock.respond("reactions.add", json!({"ok": true}));
        let client = Client::new(mock.clone());

        client
            .call_method("reactions.add", Params::new().with("flag", true))
            .await
            .unwrap();
        assert_eq!(mock.calls()[0].params.get("flag"), Some(&json!(true)));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let client = Client::new(MockTransport::new());
        let err = client
            .api_call("users.list", None, Params::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "mock transport has no response for users.list");
    }
}
