//! xslack - typed, navigable Slack Web API client
//!
//! Responses come back as entities and indexed collections instead of raw
//! JSON maps: look channels up by name, resolve a channel's members, page
//! through history after a timestamp, resolve emoji aliases. A
//! [`CachedClient`] can memoize `*.list` calls to JSON files.
//!
//! ```no_run
//! use xslack::{Api, CachedClient, Client, Config, Params};
//!
//! # async fn run() -> xslack::Result<()> {
//! let config = Config::load()?;
//! let client = CachedClient::from_config(Client::from_config(&config)?, &config)?;
//! let api = Api::from(client);
//!
//! let general = api.channel().by_name("general").await?;
//! general.post_message("hello", Params::new()).await?;
//! for msg in &general.history_after("1700000000.000000", false).await? {
//!     println!("{:?}: {:?}", msg.user(), msg.text());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod transport;

pub use api::{Api, ApiCall, CachedClient, Client};
pub use config::Config;
pub use error::{Error, Result};
pub use models::{
    Channel, ChannelHistory, ChannelRef, Channels, Emoji, EmojiKind, Emojies,
    HistoryAfterOptions, Message, Params, Record, User, UserRef, Users,
};
pub use transport::{Files, HttpTransport, MockTransport, Transport};
