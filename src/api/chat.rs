//! `chat.*` methods

use super::Api;
use crate::error::Result;
use crate::models::{ChannelRef, Params, Record, UserRef};

pub struct ChatApi {
    api: Api,
}

impl ChatApi {
    pub(crate) fn new(api: Api) -> Self {
        Self { api }
    }

    /// Post `text` to `channel`; `opts` carries extra fields such as `thread_ts`.
    pub async fn post_message<'a>(
        &self,
        channel: impl Into<ChannelRef<'a>>,
        text: &str,
        opts: Params,
    ) -> Result<Record> {
        let params = Params::new()
            .with("channel", channel.into().id())
            .with("text", text)
            .merge(opts);
        self.api.api_call("chat.postMessage", params).await
    }

    /// Post a message only `user` can see.
    pub async fn post_ephemeral<'a, 'b>(
        &self,
        channel: impl Into<ChannelRef<'a>>,
        text: &str,
        user: impl Into<UserRef<'b>>,
        opts: Params,
    ) -> Result<Record> {
        let params = Params::new()
            .with("channel", channel.into().id())
            .with("text", text)
            .with("user", user.into().id())
            .merge(opts);
        self.api.api_call("chat.postEphemeral", params).await
    }
}
