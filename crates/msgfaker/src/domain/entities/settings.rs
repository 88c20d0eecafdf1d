//! FakerSettings Entity
//!
//! Values collected by the settings layer and persisted between sessions.

use serde::{Deserialize, Serialize};

use super::message::RichEmbed;

/// Content used by the quick test helper
pub const QUICK_TEST_CONTENT: &str = "This is a test message!";

/// Persisted faker settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FakerSettings {
    /// Whose conversation the message is injected into
    #[serde(default)]
    pub target_user_id: String,
    /// Who the message appears to be from
    #[serde(default)]
    pub from_user_id: String,
    #[serde(default)]
    pub message_content: String,
    #[serde(default)]
    pub embed_enabled: bool,
    #[serde(default)]
    pub embed_title: String,
    #[serde(default)]
    pub embed_description: String,
    #[serde(default)]
    pub embed_image_url: String,
}

impl FakerSettings {
    /// Settings that inject a test message from the current user into
    /// their own conversation
    pub fn quick_test(current_user_id: impl Into<String>) -> Self {
        let current_user_id = current_user_id.into();
        Self {
            target_user_id: current_user_id.clone(),
            from_user_id: current_user_id,
            message_content: QUICK_TEST_CONTENT.to_string(),
            ..Self::default()
        }
    }

    /// Target id with pasted whitespace removed
    pub fn target(&self) -> &str {
        self.target_user_id.trim()
    }

    /// Sender id with pasted whitespace removed
    pub fn sender(&self) -> &str {
        self.from_user_id.trim()
    }

    /// Names of required fields that are empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.target().is_empty() {
            missing.push("target_user_id");
        }
        if self.sender().is_empty() {
            missing.push("from_user_id");
        }
        if self.message_content.is_empty() {
            missing.push("message_content");
        }
        missing
    }

    /// Embed to attach, if enabled and at least one field is filled in
    pub fn embed(&self) -> Option<RichEmbed> {
        if !self.embed_enabled {
            return None;
        }
        RichEmbed::from_fields(
            &self.embed_title,
            &self.embed_description,
            &self.embed_image_url,
        )
    }
}
