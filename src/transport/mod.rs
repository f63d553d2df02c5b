//! Transport layer abstractions
//!
//! The transport performs one authenticated Web API call and hands back the
//! parsed JSON payload. Network, auth and retry concerns all live here.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::Params;

pub(crate) mod http;
pub mod mock;

pub use http::HttpTransport;
pub use mock::MockTransport;

/// Multipart uploads: form field name to file on disk.
pub type Files = BTreeMap<String, PathBuf>;

/// Performs a single Web API method call.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn api_call(
        &self,
        method: &str,
        files: Option<&Files>,
        params: &Params,
    ) -> anyhow::Result<Value>;
}
