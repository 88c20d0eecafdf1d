//! Message Fabricator
//!
//! Builds synthetic message records. Reads the identity directory and the
//! clock, touches nothing else.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{synthetic_message_id, Identity, MonotonicClock, RichEmbed, SyntheticMessage};
use crate::ports::IdentityDirectory;

/// Fabricates synthetic messages
pub struct MessageFabricator<D: IdentityDirectory> {
    directory: Arc<D>,
    clock: MonotonicClock,
}

impl<D: IdentityDirectory> MessageFabricator<D> {
    pub fn new(directory: Arc<D>) -> Self {
        Self::with_clock(directory, MonotonicClock::default())
    }

    pub fn with_clock(directory: Arc<D>, clock: MonotonicClock) -> Self {
        Self { directory, clock }
    }

    /// Fabricate a message in `channel_id` from `author_id`
    ///
    /// Never fails: an author the directory cannot produce becomes a
    /// placeholder identity.
    pub fn fabricate(
        &self,
        channel_id: &str,
        author_id: &str,
        content: &str,
        embed: Option<RichEmbed>,
    ) -> SyntheticMessage {
        let author = self.resolve_author(author_id);
        let timestamp = self.clock.now();
        let id = synthetic_message_id(timestamp);

        debug!(
            message_id = %id,
            channel_id = %channel_id,
            author_id = %author_id,
            placeholder = author.is_placeholder(),
            content_len = content.len(),
            "Fabricated synthetic message"
        );

        SyntheticMessage::new(id, channel_id, author, content, timestamp).with_embed(embed)
    }

    fn resolve_author(&self, author_id: &str) -> Identity {
        match self.directory.get_user(author_id) {
            Ok(Some(user)) => Identity::Known(user),
            Ok(None) => {
                debug!(author_id = %author_id, "Author not in directory, using placeholder");
                Identity::placeholder(author_id)
            }
            Err(e) => {
                warn!(author_id = %author_id, error = %e, "Author lookup failed, using placeholder");
                Identity::placeholder(author_id)
            }
        }
    }
}
