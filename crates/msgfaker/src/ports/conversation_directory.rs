//! Conversation Directory Port
//!
//! Read access to the current user's private channels.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, DirectChannel};

/// Host's private channel list
#[async_trait]
pub trait ConversationDirectory: Send + Sync {
    /// List the current user's private channels, most recent first
    ///
    /// Lookup only: implementations must never open a new channel here.
    async fn private_channels(&self) -> Result<Vec<DirectChannel>, DomainError>;
}
