//! Faker Application Service (Use Case)
//!
//! Runs resolve -> fabricate -> inject for one set of settings.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::FakerSettings;
use crate::ports::{ConversationDirectory, EventSink, IdentityDirectory};

use super::{ConversationResolver, EventInjector, MessageFabricator};

/// Result of one end-to-end send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The message is now in the host store
    Injected {
        channel_id: String,
        message_id: String,
    },
    /// Target, sender or content was empty
    MissingFields(Vec<&'static str>),
    /// The current user has no direct conversation with the target
    ConversationNotFound { target_user_id: String },
    /// The host did not accept the event
    InjectionFailed { channel_id: String },
}

impl SendOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Injected { .. })
    }

    /// End-user notice for this outcome
    pub fn notice(&self) -> &'static str {
        match self {
            Self::Injected { .. } => "Fake message sent!",
            Self::MissingFields(_) => "Please fill in all required fields",
            Self::ConversationNotFound { .. } => {
                "Could not find DM channel. Try opening a DM with this user first."
            }
            Self::InjectionFailed { .. } => "Failed to send fake message",
        }
    }
}

/// Application service wiring the three steps to one host
pub struct FakerService<D, C, S>
where
    D: IdentityDirectory,
    C: ConversationDirectory,
    S: EventSink,
{
    fabricator: MessageFabricator<D>,
    resolver: ConversationResolver<C>,
    injector: EventInjector<S>,
}

impl<D, C, S> FakerService<D, C, S>
where
    D: IdentityDirectory,
    C: ConversationDirectory,
    S: EventSink,
{
    pub fn new(identities: Arc<D>, conversations: Arc<C>, sink: Arc<S>) -> Self {
        Self::from_parts(
            MessageFabricator::new(identities),
            ConversationResolver::new(conversations),
            EventInjector::new(sink),
        )
    }

    pub fn from_parts(
        fabricator: MessageFabricator<D>,
        resolver: ConversationResolver<C>,
        injector: EventInjector<S>,
    ) -> Self {
        Self {
            fabricator,
            resolver,
            injector,
        }
    }

    pub fn fabricator(&self) -> &MessageFabricator<D> {
        &self.fabricator
    }

    pub fn resolver(&self) -> &ConversationResolver<C> {
        &self.resolver
    }

    pub fn injector(&self) -> &EventInjector<S> {
        &self.injector
    }

    /// Inject the message described by `settings`
    ///
    /// Stops before fabricating when a field is missing or the target has
    /// no direct conversation; host state is untouched in both cases.
    pub async fn send(&self, settings: &FakerSettings) -> SendOutcome {
        let missing = settings.missing_fields();
        if !missing.is_empty() {
            debug!(missing = ?missing, "Send rejected, required fields empty");
            return SendOutcome::MissingFields(missing);
        }

        let target = settings.target();
        let Some(channel_id) = self.resolver.resolve_direct_conversation(target).await else {
            warn!(target_user_id = %target, "No direct conversation to inject into");
            return SendOutcome::ConversationNotFound {
                target_user_id: target.to_string(),
            };
        };

        let message = self.fabricator.fabricate(
            &channel_id,
            settings.sender(),
            &settings.message_content,
            settings.embed(),
        );
        let message_id = message.id.clone();

        if self.injector.inject(&channel_id, message) {
            info!(channel_id = %channel_id, message_id = %message_id, "Fake message sent");
            SendOutcome::Injected {
                channel_id,
                message_id,
            }
        } else {
            SendOutcome::InjectionFailed { channel_id }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::InMemoryHost;
    use crate::domain::{DirectChannel, UserRecord};

    type TestService = FakerService<InMemoryHost, InMemoryHost, InMemoryHost>;

    fn service(host: InMemoryHost) -> (Arc<InMemoryHost>, TestService) {
        let host = Arc::new(host);
        let service = FakerService::new(host.clone(), host.clone(), host.clone());
        (host, service)
    }

    fn settings(target: &str, from: &str, content: &str) -> FakerSettings {
        FakerSettings {
            target_user_id: target.into(),
            from_user_id: from.into(),
            message_content: content.into(),
            ..FakerSettings::default()
        }
    }

    fn populated() -> InMemoryHost {
        InMemoryHost::new()
            .with_user(UserRecord::new("U2", "Bob"))
            .with_channel(DirectChannel::direct("C1", "U1"))
    }

    #[tokio::test]
    async fn test_send_injects_into_resolved_channel() {
        let (host, service) = service(populated());
        let outcome = service.send(&settings("U1", "U2", "hello")).await;

        let (channel_id, message_id) = match outcome {
            SendOutcome::Injected {
                channel_id,
                message_id,
            } => (channel_id, message_id),
            other => panic!("Expected Injected, got {:?}", other),
        };
        assert_eq!(channel_id, "C1");

        let (_, payload) = host.last_published().unwrap();
        assert_eq!(payload["message"]["id"], message_id.as_str());
        assert_eq!(payload["message"]["author"]["username"], "Bob");
        assert_eq!(payload["message"]["content"], "hello");
        assert_eq!(payload["message"]["embeds"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_send_without_conversation_touches_nothing() {
        let (host, service) = service(populated());
        let outcome = service.send(&settings("U3", "U2", "hello")).await;

        assert_eq!(
            outcome,
            SendOutcome::ConversationNotFound {
                target_user_id: "U3".into()
            }
        );
        assert!(!outcome.is_success());
        assert_eq!(host.published_count(), 0);
    }

    #[tokio::test]
    async fn test_send_requires_fields() {
        let (host, service) = service(populated());
        let outcome = service.send(&settings("U1", " ", "")).await;

        assert_eq!(
            outcome,
            SendOutcome::MissingFields(vec!["from_user_id", "message_content"])
        );
        assert_eq!(outcome.notice(), "Please fill in all required fields");
        assert_eq!(host.published_count(), 0);
    }

    #[tokio::test]
    async fn test_send_reports_injection_failure() {
        let mut host = populated();
        host.fail_publish = true;
        let (_, service) = service(host);

        let outcome = service.send(&settings("U1", "U2", "hello")).await;
        assert_eq!(
            outcome,
            SendOutcome::InjectionFailed {
                channel_id: "C1".into()
            }
        );
    }

    #[tokio::test]
    async fn test_send_attaches_enabled_embed() {
        let (host, service) = service(populated());
        let mut settings = settings("U1", "U2", "hello");
        settings.embed_enabled = true;
        settings.embed_description = "details".into();

        assert!(service.send(&settings).await.is_success());

        let (_, payload) = host.last_published().unwrap();
        let embed = &payload["message"]["embeds"][0];
        assert_eq!(embed["description"], "details");
        assert!(embed.get("title").is_none());
    }
}
