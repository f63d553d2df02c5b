//! `channels.*` methods

use super::Api;
use crate::error::Result;
use crate::models::{Channel, ChannelRef, Channels, Params, Record};

pub struct ChannelApi {
    api: Api,
}

impl ChannelApi {
    pub(crate) fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Channels> {
        let resp = self.api.api_call("channels.list", Params::new()).await?;
        Channels::from_values(&self.api, resp.require_array("channels")?)
    }

    pub async fn info<'a>(&self, channel: impl Into<ChannelRef<'a>>) -> Result<Channel> {
        let params = Params::new().with("channel", channel.into().id());
        let resp = self.api.api_call("channels.info", params).await?;
        Channel::new(self.api.clone(), resp.require_nested("channel")?)
    }

    /// Raw history page; use [`Channel::history_after`] to page through it.
    pub async fn history<'a>(
        &self,
        channel: impl Into<ChannelRef<'a>>,
        filters: Params,
    ) -> Result<Record> {
        let params = Params::new()
            .with("channel", channel.into().id())
            .merge(filters);
        self.api.api_call("channels.history", params).await
    }

    /// Fetches a fresh list on every call.
    pub async fn by_name(&self, name: &str) -> Result<Channel> {
        self.list().await?.by_name(name).cloned()
    }
}
