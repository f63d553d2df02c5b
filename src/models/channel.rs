//! Channel entity, indexed channel list and history pagination

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::watch;

use super::{truthy, ChannelHistory, Message, Params, Record, User, UserRef};
use crate::api::Api;
use crate::error::{Error, Result};

/// Maximum page size accepted by `channels.history`
pub const HISTORY_PAGE_SIZE: u32 = 1000;

/// Pause between history pages
pub const HISTORY_PAGE_DELAY: Duration = Duration::from_millis(200);

/// A channel bound to the client that fetched it.
#[derive(Clone)]
pub struct Channel {
    api: Api,
    id: String,
    record: Record,
}

impl Channel {
    /// Wrap a channel record. Fails when the record has no string `id`.
    pub fn new(api: Api, record: Record) -> Result<Self> {
        let id = record.require_str("id")?.to_string();
        Ok(Self { api, id, record })
    }

    pub(crate) fn from_value(api: &Api, value: &Value) -> Result<Self> {
        let record = Record::object(value, "channel")?;
        Self::new(api.clone(), record)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.record.str_field("name")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.record.get(key)
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.record.str_field(key)
    }

    /// Nested objects such as `topic` or `purpose`, wrapped fresh each call.
    pub fn nested(&self, key: &str) -> Option<Record> {
        self.record.nested(key)
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub async fn info(&self) -> Result<Channel> {
        self.api.channel().info(self).await
    }

    pub async fn post_message(&self, text: &str, opts: Params) -> Result<Record> {
        self.api.chat().post_message(self, text, opts).await
    }

    pub async fn post_ephemeral<'a>(
        &self,
        text: &str,
        user: impl Into<UserRef<'a>>,
        opts: Params,
    ) -> Result<Record> {
        self.api.chat().post_ephemeral(self, text, user, opts).await
    }

    /// One raw `channels.history` page.
    pub async fn history(&self, filters: Params) -> Result<Record> {
        self.api.channel().history(self, filters).await
    }

    /// History page of messages up to and including `ts`.
    pub async fn history_before(&self, ts: &str, filters: Params) -> Result<Record> {
        self.history(Params::new().with("newest", ts).merge(filters))
            .await
    }

    /// Every message after `ts`, oldest first.
    pub async fn history_after(&self, ts: &str, inclusive: bool) -> Result<ChannelHistory> {
        self.history_after_with(
            ts,
            HistoryAfterOptions {
                inclusive,
                ..HistoryAfterOptions::default()
            },
        )
        .await
    }

    /// Page through history after the watermark `ts`.
    ///
    /// Pages arrive newest-first and are reversed onto the running list, so
    /// the result is oldest-first. Each following request starts at the
    /// newest message seen so far, exclusively. A page that is empty while
    /// the API still reports `has_more` ends the loop early, and the returned
    /// history keeps `has_more == true`.
    pub async fn history_after_with(
        &self,
        ts: &str,
        opts: HistoryAfterOptions,
    ) -> Result<ChannelHistory> {
        let HistoryAfterOptions {
            mut inclusive,
            page_size,
            page_delay,
            mut cancel,
        } = opts;

        let mut messages: Vec<Message> = Vec::new();
        let mut next_ts = ts.to_string();
        let mut has_more = true;

        while has_more {
            if is_cancelled(cancel.as_ref()) {
                return Err(Error::Cancelled);
            }

            let resp = self
                .history(
                    Params::new()
                        .with("oldest", next_ts.as_str())
                        .with("count", page_size)
                        .with("inclusive", inclusive),
                )
                .await?;
            has_more = resp.get("has_more").is_some_and(truthy);

            let page = resp.require_array("messages")?;
            if page.is_empty() {
                if has_more {
                    tracing::warn!(
                        channel = %self.id,
                        oldest = %next_ts,
                        "empty history page with has_more set, stopping"
                    );
                    break;
                }
                continue;
            }

            for value in page.iter().rev() {
                messages.push(Message::from_value(value.clone())?);
            }
            next_ts = messages
                .last()
                .and_then(Message::ts)
                .ok_or_else(|| Error::missing("ts"))?
                .to_string();
            inclusive = false;
            tracing::debug!(channel = %self.id, fetched = messages.len(), has_more, "history page");

            if has_more {
                pause(page_delay, cancel.as_mut()).await?;
            }
        }

        Ok(ChannelHistory::new(messages, has_more))
    }

    /// Members resolved against a freshly fetched user list.
    pub async fn members(&self) -> Result<Vec<User>> {
        let ids = self.record.require_array("members")?;
        let users = self.api.user().list(Params::new()).await?;
        ids.iter()
            .map(|id| {
                let id = id.as_str().ok_or_else(|| Error::missing("members"))?;
                users.by_id(id).cloned()
            })
            .collect()
    }
}

impl PartialEq for Channel {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}

/// Tuning for [`Channel::history_after_with`].
#[derive(Debug, Clone)]
pub struct HistoryAfterOptions {
    /// Include the watermark message itself on the first request
    pub inclusive: bool,
    pub page_size: u32,
    pub page_delay: Duration,
    /// Set to `true` to stop paging
    pub cancel: Option<watch::Receiver<bool>>,
}

impl Default for HistoryAfterOptions {
    fn default() -> Self {
        Self {
            inclusive: false,
            page_size: HISTORY_PAGE_SIZE,
            page_delay: HISTORY_PAGE_DELAY,
            cancel: None,
        }
    }
}

fn is_cancelled(cancel: Option<&watch::Receiver<bool>>) -> bool {
    cancel.is_some_and(|rx| *rx.borrow())
}

async fn cancelled(rx: &mut watch::Receiver<bool>) {
    loop {
        let flag = *rx.borrow_and_update();
        if flag {
            return;
        }
        if rx.changed().await.is_err() {
            // Sender gone; cancellation can no longer happen.
            std::future::pending::<()>().await;
        }
    }
}

async fn pause(delay: Duration, cancel: Option<&mut watch::Receiver<bool>>) -> Result<()> {
    match cancel {
        None => {
            tokio::time::sleep(delay).await;
            Ok(())
        }
        Some(rx) => tokio::select! {
            _ = tokio::time::sleep(delay) => Ok(()),
            _ = cancelled(rx) => Err(Error::Cancelled),
        },
    }
}

/// A channel given either by id or as an entity.
#[derive(Debug, Clone, Copy)]
pub enum ChannelRef<'a> {
    Id(&'a str),
    Channel(&'a Channel),
}

impl<'a> ChannelRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            ChannelRef::Id(id) => id,
            ChannelRef::Channel(channel) => channel.id(),
        }
    }
}

impl<'a> From<&'a str> for ChannelRef<'a> {
    fn from(id: &'a str) -> Self {
        ChannelRef::Id(id)
    }
}

impl<'a> From<&'a String> for ChannelRef<'a> {
    fn from(id: &'a String) -> Self {
        ChannelRef::Id(id)
    }
}

impl<'a> From<&'a Channel> for ChannelRef<'a> {
    fn from(channel: &'a Channel) -> Self {
        ChannelRef::Channel(channel)
    }
}

/// Channels in response order, indexed by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Channels {
    items: Vec<Channel>,
    by_name: HashMap<String, usize>,
}

impl Channels {
    pub fn new(items: Vec<Channel>) -> Self {
        let by_name = items
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.name().map(|name| (name.to_string(), i)))
            .collect();
        Self { items, by_name }
    }

    pub(crate) fn from_values(api: &Api, values: &[Value]) -> Result<Self> {
        let items = values
            .iter()
            .map(|v| Channel::from_value(api, v))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(items))
    }

    pub fn by_name(&self, name: &str) -> Result<&Channel> {
        self.by_name
            .get(name)
            .map(|&i| &self.items[i])
            .ok_or_else(|| Error::not_found("channel", name))
    }

    pub fn get(&self, index: usize) -> Option<&Channel> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Channel> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Channel> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Channels {
    type Item = &'a Channel;
    type IntoIter = std::slice::Iter<'a, Channel>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
