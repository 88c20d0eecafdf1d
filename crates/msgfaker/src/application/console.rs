//! Console Surface
//!
//! Named entry points for direct invocation (`inject`, `createMessage`,
//! `getDMChannel`). A composition root installs them in a
//! [`ConsoleRegistry`] on load and removes them on unload.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{DomainError, RichEmbed, SyntheticMessage};
use crate::ports::{ConversationDirectory, EventSink, IdentityDirectory};

use super::FakerService;

/// Name the faker surface is installed under
pub const CONSOLE_NAME: &str = "messageFaker";

/// Calls exposed on the console surface
#[async_trait]
pub trait ConsoleApi: Send + Sync {
    /// Fabricate and inject in one step
    fn inject(
        &self,
        channel_id: &str,
        author_id: &str,
        content: &str,
        embed: Option<RichEmbed>,
    ) -> bool;

    /// Fabricate without injecting
    fn create_message(
        &self,
        channel_id: &str,
        author_id: &str,
        content: &str,
        embed: Option<RichEmbed>,
    ) -> SyntheticMessage;

    /// Existing direct channel with `user_id`
    async fn get_dm_channel(&self, user_id: &str) -> Option<String>;
}

#[async_trait]
impl<D, C, S> ConsoleApi for FakerService<D, C, S>
where
    D: IdentityDirectory,
    C: ConversationDirectory,
    S: EventSink,
{
    fn inject(
        &self,
        channel_id: &str,
        author_id: &str,
        content: &str,
        embed: Option<RichEmbed>,
    ) -> bool {
        let message = self
            .fabricator()
            .fabricate(channel_id, author_id, content, embed);
        self.injector().inject(channel_id, message)
    }

    fn create_message(
        &self,
        channel_id: &str,
        author_id: &str,
        content: &str,
        embed: Option<RichEmbed>,
    ) -> SyntheticMessage {
        self.fabricator()
            .fabricate(channel_id, author_id, content, embed)
    }

    async fn get_dm_channel(&self, user_id: &str) -> Option<String> {
        self.resolver().resolve_direct_conversation(user_id).await
    }
}

/// Scoped registry of console surfaces
#[derive(Default)]
pub struct ConsoleRegistry {
    entries: RwLock<HashMap<String, Arc<dyn ConsoleApi>>>,
}

impl ConsoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `api` under `name`
    pub fn install(&self, name: &str, api: Arc<dyn ConsoleApi>) -> Result<(), DomainError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.contains_key(name) {
            return Err(DomainError::Conflict(format!(
                "Console surface '{}' is already installed",
                name
            )));
        }
        entries.insert(name.to_string(), api);
        debug!(name = %name, "Installed console surface");
        Ok(())
    }

    /// Remove the surface installed under `name`, returns whether one existed
    pub fn uninstall(&self, name: &str) -> bool {
        let removed = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .is_some();
        if removed {
            debug!(name = %name, "Uninstalled console surface");
        }
        removed
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ConsoleApi>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn is_installed(&self, name: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }
}
