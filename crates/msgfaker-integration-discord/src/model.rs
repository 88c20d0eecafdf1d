//! Discord client wire types
//!
//! Shapes of the objects held by the client's stores, and the snapshot
//! format used to hydrate them.

use std::collections::BTreeMap;

use msgfaker::{DirectChannel, UserRecord};
use serde::{Deserialize, Serialize};
use serenity::model::channel::ChannelType;

/// User as held by the client's user store
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DiscordUser {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<bool>,
}

impl DiscordUser {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            discriminator: None,
            avatar: None,
            bot: None,
        }
    }
}

impl From<DiscordUser> for UserRecord {
    fn from(user: DiscordUser) -> Self {
        let mut record = UserRecord::new(user.id, user.username).with_bot(user.bot.unwrap_or(false));
        if let Some(discriminator) = user.discriminator {
            record.discriminator = discriminator;
        }
        match user.avatar {
            Some(avatar) => record.with_avatar(avatar),
            None => record,
        }
    }
}

/// Private channel as held by the client's channel store
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DiscordChannel {
    pub id: String,
    /// Discord channel type number (1 = DM, 3 = group DM)
    #[serde(rename = "type")]
    pub kind: u8,
    /// Recipient user ids, the current user excluded
    #[serde(default)]
    pub recipients: Vec<String>,
}

impl DiscordChannel {
    /// One-to-one channel with `recipient`
    pub fn dm(id: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: u8::from(ChannelType::Private),
            recipients: vec![recipient.into()],
        }
    }

    /// Group channel with `recipients`
    pub fn group_dm(id: impl Into<String>, recipients: Vec<String>) -> Self {
        Self {
            id: id.into(),
            kind: u8::from(ChannelType::GroupDm),
            recipients,
        }
    }

    pub fn channel_type(&self) -> ChannelType {
        ChannelType::from(self.kind)
    }

    /// Domain view of a private channel, `None` for guild channels
    pub fn to_direct_channel(&self) -> Option<DirectChannel> {
        match self.channel_type() {
            ChannelType::Private => Some(DirectChannel {
                id: self.id.clone(),
                kind: msgfaker::ChannelKind::Direct,
                recipients: self.recipients.clone(),
            }),
            ChannelType::GroupDm => Some(DirectChannel::group(
                self.id.clone(),
                self.recipients.clone(),
            )),
            _ => None,
        }
    }
}

/// Message as held by the client's message store
///
/// Fields the store does not interpret are kept in `extra` so a cached
/// message round-trips unchanged.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DiscordMessage {
    pub id: String,
    pub channel_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
    pub author: DiscordUser,
    pub content: String,
    pub timestamp: String,
    #[serde(default)]
    pub embeds: Vec<serde_json::Value>,
    /// Set on client-fabricated messages
    #[serde(rename = "_fake", default, skip_serializing_if = "std::ops::Not::not")]
    pub fake: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Serialized client state used to hydrate a [`crate::DiscordStore`]
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct HostSnapshot {
    #[serde(default)]
    pub current_user_id: Option<String>,
    #[serde(default)]
    pub users: Vec<DiscordUser>,
    /// Private channels, most recently active first
    #[serde(default)]
    pub private_channels: Vec<DiscordChannel>,
    /// Cached messages per channel id, oldest first
    #[serde(default)]
    pub messages: BTreeMap<String, Vec<DiscordMessage>>,
}
