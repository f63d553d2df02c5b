//! API clients for the Slack Web API
//!
//! [`Client`] dispatches calls through a [`Transport`](crate::transport::Transport);
//! [`CachedClient`] decorates it with file-backed memoization of `*.list`
//! calls. Either is wrapped in an [`Api`] handle, which hands out the
//! per-resource façades and is what entities keep as their back-reference.

mod cached;
mod channel;
mod chat;
mod client;
mod emoji;
mod user;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Params, Record};
use crate::transport::Files;

pub use cached::CachedClient;
pub use channel::ChannelApi;
pub use chat::ChatApi;
pub use client::Client;
pub use emoji::EmojiApi;
pub use user::UserApi;

/// Method dispatch shared by [`Client`] and [`CachedClient`].
#[async_trait]
pub trait ApiCall: Send + Sync {
    /// Call a modeled method. `params` is the full, merged argument map.
    async fn api_call(
        &self,
        method: &str,
        files: Option<&Files>,
        params: Params,
    ) -> Result<Record>;

    /// Forward any method verbatim to the transport.
    async fn call_method(&self, method: &str, params: Params) -> Result<Record>;
}

/// Cheap, clonable handle over a client.
#[derive(Clone)]
pub struct Api {
    inner: Arc<dyn ApiCall>,
}

impl Api {
    pub fn new(client: impl ApiCall + 'static) -> Self {
        Self {
            inner: Arc::new(client),
        }
    }

    pub async fn api_call(&self, method: &str, params: Params) -> Result<Record> {
        self.inner.api_call(method, None, params).await
    }

    pub async fn api_call_with_files(
        &self,
        method: &str,
        files: &Files,
        params: Params,
    ) -> Result<Record> {
        self.inner.api_call(method, Some(files), params).await
    }

    pub async fn call_method(&self, method: &str, params: Params) -> Result<Record> {
        self.inner.call_method(method, params).await
    }

    pub fn channel(&self) -> ChannelApi {
        ChannelApi::new(self.clone())
    }

    pub fn user(&self) -> UserApi {
        UserApi::new(self.clone())
    }

    pub fn chat(&self) -> ChatApi {
        ChatApi::new(self.clone())
    }

    pub fn emoji(&self) -> EmojiApi {
        EmojiApi::new(self.clone())
    }
}

impl fmt::Debug for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api").finish_non_exhaustive()
    }
}

impl From<Client> for Api {
    fn from(client: Client) -> Self {
        Self::new(client)
    }
}

impl From<CachedClient> for Api {
    fn from(client: CachedClient) -> Self {
        Self::new(client)
    }
}
