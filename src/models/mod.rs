//! Data models for Slack entities

mod channel;
mod emoji;
mod message;
mod params;
mod record;
mod user;

pub use channel::*;
pub use emoji::*;
pub use message::*;
pub use params::*;
pub use record::*;
pub use user::*;
