//! In-memory host used by the application tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{DirectChannel, DomainError, EventKind, UserRecord};
use crate::ports::{ConversationDirectory, EventSink, IdentityDirectory, SUPPORTED_SINK_VERSION};

pub(crate) struct InMemoryHost {
    pub users: HashMap<String, UserRecord>,
    pub channels: Vec<DirectChannel>,
    pub published: Mutex<Vec<(EventKind, serde_json::Value)>>,
    pub version: u32,
    pub fail_users: bool,
    pub fail_channels: bool,
    pub fail_publish: bool,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
            channels: Vec::new(),
            published: Mutex::new(Vec::new()),
            version: SUPPORTED_SINK_VERSION,
            fail_users: false,
            fail_channels: false,
            fail_publish: false,
        }
    }

    pub fn with_user(mut self, user: UserRecord) -> Self {
        self.users.insert(user.id.clone(), user);
        self
    }

    pub fn with_channel(mut self, channel: DirectChannel) -> Self {
        self.channels.push(channel);
        self
    }

    pub fn published_count(&self) -> usize {
        self.published.lock().unwrap().len()
    }

    pub fn last_published(&self) -> Option<(EventKind, serde_json::Value)> {
        self.published.lock().unwrap().last().cloned()
    }
}

impl IdentityDirectory for InMemoryHost {
    fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, DomainError> {
        if self.fail_users {
            return Err(DomainError::HostUnavailable("user store offline".into()));
        }
        Ok(self.users.get(user_id).cloned())
    }

    fn current_user_id(&self) -> Option<String> {
        Some("ME".to_string())
    }
}

#[async_trait]
impl ConversationDirectory for InMemoryHost {
    async fn private_channels(&self) -> Result<Vec<DirectChannel>, DomainError> {
        if self.fail_channels {
            return Err(DomainError::HostUnavailable("channel store offline".into()));
        }
        Ok(self.channels.clone())
    }
}

impl EventSink for InMemoryHost {
    fn version(&self) -> u32 {
        self.version
    }

    fn publish(&self, kind: EventKind, payload: serde_json::Value) -> Result<(), DomainError> {
        if self.fail_publish {
            return Err(DomainError::HostIncompatible("no handler for action".into()));
        }
        self.published.lock().unwrap().push((kind, payload));
        Ok(())
    }
}
