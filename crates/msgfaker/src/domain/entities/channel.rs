//! DirectChannel Entity
//!
//! A private conversation the current user already has with other users.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ChannelKind;

/// Private channel as reported by the host
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectChannel {
    pub id: String,
    pub kind: ChannelKind,
    /// Participants other than the current user
    pub recipients: Vec<String>,
}

impl DirectChannel {
    /// Create a one-to-one channel with a single recipient
    pub fn direct(id: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ChannelKind::Direct,
            recipients: vec![recipient.into()],
        }
    }

    /// Create a group channel
    pub fn group(id: impl Into<String>, recipients: Vec<String>) -> Self {
        Self {
            id: id.into(),
            kind: ChannelKind::Group,
            recipients,
        }
    }

    pub fn has_recipient(&self, user_id: &str) -> bool {
        self.recipients.iter().any(|r| r == user_id)
    }

    pub fn is_direct(&self) -> bool {
        self.kind == ChannelKind::Direct
    }
}
