//! Discord client stores
//!
//! In-memory user, private channel and message stores of a Discord client.
//! Reads go through the msgfaker directory ports; writes only arrive
//! through dispatched actions.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use msgfaker::{ConversationDirectory, DirectChannel, DomainError, IdentityDirectory, UserRecord};
use tracing::debug;

use crate::model::{DiscordChannel, DiscordMessage, DiscordUser, HostSnapshot};

#[derive(Default)]
struct StoreState {
    current_user_id: Option<String>,
    users: HashMap<String, DiscordUser>,
    /// Most recently active first
    private_channels: Vec<DiscordChannel>,
    messages: HashMap<String, Vec<DiscordMessage>>,
}

/// Client-side stores of a Discord session
#[derive(Default)]
pub struct DiscordStore {
    state: RwLock<StoreState>,
}

impl DiscordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate the stores from a snapshot
    pub fn from_snapshot(snapshot: HostSnapshot) -> Self {
        let state = StoreState {
            current_user_id: snapshot.current_user_id,
            users: snapshot
                .users
                .into_iter()
                .map(|u| (u.id.clone(), u))
                .collect(),
            private_channels: snapshot.private_channels,
            messages: snapshot.messages.into_iter().collect(),
        };
        Self {
            state: RwLock::new(state),
        }
    }

    /// Serialize the current store contents
    pub fn snapshot(&self) -> Result<HostSnapshot, DomainError> {
        let state = self.read()?;
        let mut users: Vec<DiscordUser> = state.users.values().cloned().collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(HostSnapshot {
            current_user_id: state.current_user_id.clone(),
            users,
            private_channels: state.private_channels.clone(),
            messages: state
                .messages
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        })
    }

    pub fn set_current_user(&self, user: DiscordUser) -> Result<(), DomainError> {
        let mut state = self.write()?;
        state.current_user_id = Some(user.id.clone());
        state.users.insert(user.id.clone(), user);
        Ok(())
    }

    pub fn add_user(&self, user: DiscordUser) -> Result<(), DomainError> {
        self.write()?.users.insert(user.id.clone(), user);
        Ok(())
    }

    /// Track a private channel as the most recently active one
    pub fn add_private_channel(&self, channel: DiscordChannel) -> Result<(), DomainError> {
        let mut state = self.write()?;
        state.private_channels.retain(|c| c.id != channel.id);
        state.private_channels.insert(0, channel);
        Ok(())
    }

    /// Cached messages of a channel, oldest first
    pub fn messages(&self, channel_id: &str) -> Result<Vec<DiscordMessage>, DomainError> {
        Ok(self
            .read()?
            .messages
            .get(channel_id)
            .cloned()
            .unwrap_or_default())
    }

    pub fn message_count(&self, channel_id: &str) -> Result<usize, DomainError> {
        Ok(self
            .read()?
            .messages
            .get(channel_id)
            .map(Vec::len)
            .unwrap_or(0))
    }

    pub fn message(&self, channel_id: &str, message_id: &str) -> Result<DiscordMessage, DomainError> {
        self.read()?
            .messages
            .get(channel_id)
            .and_then(|msgs| msgs.iter().find(|m| m.id == message_id))
            .cloned()
            .ok_or_else(|| DomainError::not_found("Message", message_id))
    }

    /// `MESSAGE_CREATE` action handler
    ///
    /// Messages are keyed by id within a channel: a second message with the
    /// same id replaces the first.
    pub fn handle_message_create(&self, action: &serde_json::Value) -> Result<(), DomainError> {
        let channel_id = action
            .get("channelId")
            .and_then(|c| c.as_str())
            .ok_or_else(|| {
                DomainError::HostIncompatible("MESSAGE_CREATE without channelId".into())
            })?
            .to_string();

        let data = action.get("message").ok_or_else(|| {
            DomainError::HostIncompatible("MESSAGE_CREATE without message".into())
        })?;

        let message: DiscordMessage = serde_json::from_value(data.clone())
            .map_err(|e| DomainError::HostIncompatible(format!("Invalid MESSAGE_CREATE: {}", e)))?;

        if message.channel_id != channel_id {
            return Err(DomainError::Validation(format!(
                "Message {} belongs to channel {}, not {}",
                message.id, message.channel_id, channel_id
            )));
        }

        let mut state = self.write()?;
        let channel_messages = state.messages.entry(channel_id.clone()).or_default();
        match channel_messages.iter_mut().find(|m| m.id == message.id) {
            Some(existing) => *existing = message,
            None => channel_messages.push(message),
        }

        if let Some(pos) = state.private_channels.iter().position(|c| c.id == channel_id) {
            let channel = state.private_channels.remove(pos);
            state.private_channels.insert(0, channel);
        }

        debug!(channel_id = %channel_id, "Message store updated");
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, DomainError> {
        self.state
            .read()
            .map_err(|_| DomainError::HostUnavailable("Discord store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, DomainError> {
        self.state
            .write()
            .map_err(|_| DomainError::HostUnavailable("Discord store lock poisoned".into()))
    }
}

impl IdentityDirectory for DiscordStore {
    fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, DomainError> {
        Ok(self.read()?.users.get(user_id).cloned().map(UserRecord::from))
    }

    fn current_user_id(&self) -> Option<String> {
        self.read().ok()?.current_user_id.clone()
    }
}

#[async_trait]
impl ConversationDirectory for DiscordStore {
    async fn private_channels(&self) -> Result<Vec<DirectChannel>, DomainError> {
        Ok(self
            .read()?
            .private_channels
            .iter()
            .filter_map(DiscordChannel::to_direct_channel)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(channel_id: &str, id: &str, content: &str) -> serde_json::Value {
        serde_json::json!({
            "type": "MESSAGE_CREATE",
            "channelId": channel_id,
            "message": {
                "id": id,
                "channel_id": channel_id,
                "author": { "id": "U2", "username": "Bob" },
                "content": content,
                "timestamp": "2024-05-01T10:00:00.000Z"
            }
        })
    }

    fn store() -> DiscordStore {
        let store = DiscordStore::new();
        store.add_private_channel(DiscordChannel::dm("C2", "U2")).unwrap();
        store.add_private_channel(DiscordChannel::dm("C1", "U1")).unwrap();
        store
    }

    #[test]
    fn test_message_create_appends() {
        let store = store();
        store.handle_message_create(&action("C1", "m1", "one")).unwrap();
        store.handle_message_create(&action("C1", "m2", "two")).unwrap();

        let messages = store.messages("C1").unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, "two");
    }

    #[test]
    fn test_message_create_same_id_overwrites() {
        let store = store();
        store.handle_message_create(&action("C1", "m1", "one")).unwrap();
        store.handle_message_create(&action("C1", "m1", "edited")).unwrap();

        assert_eq!(store.message_count("C1").unwrap(), 1);
        assert_eq!(store.message("C1", "m1").unwrap().content, "edited");
    }

    #[test]
    fn test_message_create_bumps_channel() {
        let store = store();
        store.handle_message_create(&action("C2", "m1", "one")).unwrap();

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.private_channels[0].id, "C2");
    }

    #[test]
    fn test_malformed_action_rejected() {
        let store = store();
        let result = store.handle_message_create(&serde_json::json!({ "channelId": "C1" }));

        assert!(matches!(result, Err(DomainError::HostIncompatible(_))));
        assert_eq!(store.message_count("C1").unwrap(), 0);
    }

    #[test]
    fn test_message_for_other_channel_rejected() {
        let store = store();
        let mut misfiled = action("C1", "m1", "one");
        misfiled["message"]["channel_id"] = serde_json::json!("C2");

        let result = store.handle_message_create(&misfiled);

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(store.message_count("C1").unwrap(), 0);
        assert_eq!(store.message_count("C2").unwrap(), 0);
    }

    #[test]
    fn test_missing_message_is_not_found() {
        let store = store();
        assert!(matches!(
            store.message("C1", "nope"),
            Err(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn test_get_user() {
        let store = store();
        store.add_user(DiscordUser::new("U2", "Bob")).unwrap();

        assert_eq!(store.get_user("U2").unwrap().unwrap().username, "Bob");
        assert!(store.get_user("U404").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_private_channels_skip_guild_channels() {
        let store = store();
        store
            .add_private_channel(DiscordChannel {
                id: "T1".into(),
                kind: 0,
                recipients: vec![],
            })
            .unwrap();

        let channels = store.private_channels().await.unwrap();
        let ids: Vec<&str> = channels.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["C1", "C2"]);
    }
}
