//! Conversation Resolver
//!
//! Finds the existing one-to-one channel with a given user.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::ports::ConversationDirectory;

/// Resolves direct conversations against the host's channel list
pub struct ConversationResolver<C: ConversationDirectory> {
    directory: Arc<C>,
}

impl<C: ConversationDirectory> ConversationResolver<C> {
    pub fn new(directory: Arc<C>) -> Self {
        Self { directory }
    }

    /// Id of the first direct channel whose recipients include `user_id`
    ///
    /// `None` when no such channel exists or the host could not list its
    /// channels. No channel is ever opened here.
    pub async fn resolve_direct_conversation(&self, user_id: &str) -> Option<String> {
        if user_id.is_empty() {
            debug!("Empty target id, nothing to resolve");
            return None;
        }

        let channels = match self.directory.private_channels().await {
            Ok(channels) => channels,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Failed to list private channels");
                return None;
            }
        };

        let found = channels
            .into_iter()
            .find(|c| c.is_direct() && c.has_recipient(user_id))
            .map(|c| c.id);

        match &found {
            Some(channel_id) => debug!(user_id = %user_id, channel_id = %channel_id, "Resolved direct conversation"),
            None => debug!(user_id = %user_id, "No direct conversation with user"),
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::InMemoryHost;
    use crate::domain::DirectChannel;

    fn host() -> InMemoryHost {
        InMemoryHost::new()
            .with_channel(DirectChannel::group("G1", vec!["U1".into(), "U5".into()]))
            .with_channel(DirectChannel::direct("C1", "U1"))
            .with_channel(DirectChannel::direct("C2", "U2"))
    }

    #[tokio::test]
    async fn test_resolves_direct_channel() {
        let resolver = ConversationResolver::new(Arc::new(host()));

        assert_eq!(
            resolver.resolve_direct_conversation("U1").await.as_deref(),
            Some("C1")
        );
        assert_eq!(
            resolver.resolve_direct_conversation("U2").await.as_deref(),
            Some("C2")
        );
    }

    #[tokio::test]
    async fn test_group_channels_are_skipped() {
        let resolver = ConversationResolver::new(Arc::new(host()));
        assert!(resolver.resolve_direct_conversation("U5").await.is_none());
    }

    #[tokio::test]
    async fn test_missing_conversation_is_none_every_time() {
        let resolver = ConversationResolver::new(Arc::new(host()));

        for _ in 0..3 {
            assert!(resolver.resolve_direct_conversation("U3").await.is_none());
        }
    }

    #[tokio::test]
    async fn test_empty_target_is_none() {
        let resolver = ConversationResolver::new(Arc::new(host()));
        assert!(resolver.resolve_direct_conversation("").await.is_none());
    }

    #[tokio::test]
    async fn test_host_failure_is_none() {
        let mut host = host();
        host.fail_channels = true;
        let resolver = ConversationResolver::new(Arc::new(host));

        assert!(resolver.resolve_direct_conversation("U1").await.is_none());
    }
}
