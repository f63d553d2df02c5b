//! Channel messages and reconstructed history

use serde_json::Value;

use super::Record;
use crate::error::{Error, Result};

/// A single message; a plain view over its record.
#[derive(Debug, Clone, PartialEq)]
pub struct Message(Record);

impl Message {
    pub fn new(record: Record) -> Self {
        Self(record)
    }

    pub(crate) fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(Record::new(map))),
            _ => Err(Error::missing("messages")),
        }
    }

    /// Timestamp, which doubles as the message id within a channel
    pub fn ts(&self) -> Option<&str> {
        self.0.str_field("ts")
    }

    pub fn text(&self) -> Option<&str> {
        self.0.str_field("text")
    }

    /// Author id; absent for some bot messages
    pub fn user(&self) -> Option<&str> {
        self.0.str_field("user")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn nested(&self, key: &str) -> Option<Record> {
        self.0.nested(key)
    }

    pub fn record(&self) -> &Record {
        &self.0
    }
}

/// Messages after a watermark, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelHistory {
    messages: Vec<Message>,
    has_more: bool,
}

impl ChannelHistory {
    pub fn new(messages: Vec<Message>, has_more: bool) -> Self {
        Self { messages, has_more }
    }

    /// True only when fetching stopped before the API ran out of pages.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

impl<'a> IntoIterator for &'a ChannelHistory {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
