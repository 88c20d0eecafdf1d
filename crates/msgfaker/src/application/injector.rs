//! Event Injector
//!
//! Publishes synthetic messages to the host as `MESSAGE_CREATE` events.
//! The only component that mutates host state.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::{error, info, warn};

use crate::domain::{EventKind, SyntheticMessage};
use crate::ports::{EventSink, SUPPORTED_SINK_VERSION};

/// `MESSAGE_CREATE` fields, mirroring a server delivery
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageCreatePayload<'a> {
    channel_id: &'a str,
    message: &'a SyntheticMessage,
    optimistic: bool,
    send_message_options: serde_json::Value,
    is_push_notification: bool,
}

/// Injects synthetic messages into the host's dispatch pipeline
pub struct EventInjector<S: EventSink> {
    sink: Arc<S>,
    /// Ids dispatched during this session. Kept until the injector is
    /// dropped, so it grows by one entry per injected message.
    dispatched: Mutex<HashSet<String>>,
}

impl<S: EventSink> EventInjector<S> {
    pub fn new(sink: Arc<S>) -> Self {
        Self {
            sink,
            dispatched: Mutex::new(HashSet::new()),
        }
    }

    /// Dispatch `message` into `channel_id`
    ///
    /// Publishes at most once. Returns `false` without publishing when the
    /// message belongs to another channel, its id was already injected, or
    /// the sink speaks another contract version. Returns `false` when the
    /// host rejects the event.
    pub fn inject(&self, channel_id: &str, message: SyntheticMessage) -> bool {
        if message.channel_id != channel_id {
            warn!(
                channel_id = %channel_id,
                message_channel_id = %message.channel_id,
                message_id = %message.id,
                "Refusing to inject message into a channel it was not built for"
            );
            return false;
        }

        let version = self.sink.version();
        if version != SUPPORTED_SINK_VERSION {
            error!(
                version = version,
                supported = SUPPORTED_SINK_VERSION,
                "Event sink contract version mismatch"
            );
            return false;
        }

        if !self.claim(&message.id) {
            warn!(message_id = %message.id, "Message id already injected, skipping");
            return false;
        }

        let payload = MessageCreatePayload {
            channel_id,
            message: &message,
            optimistic: false,
            send_message_options: serde_json::json!({}),
            is_push_notification: false,
        };

        let published = serde_json::to_value(&payload)
            .map_err(|e| {
                error!(message_id = %message.id, error = %e, "Failed to serialize MESSAGE_CREATE");
            })
            .and_then(|payload| {
                self.sink
                    .publish(EventKind::MessageCreate, payload)
                    .map_err(|e| {
                        error!(
                            message_id = %message.id,
                            channel_id = %channel_id,
                            error = %e,
                            "Error injecting synthetic message"
                        );
                    })
            });

        if published.is_err() {
            self.release(&message.id);
            return false;
        }

        info!(message_id = %message.id, channel_id = %channel_id, "Injected synthetic message");
        true
    }

    /// Reserve `id` for this dispatch, `false` if it is already taken
    fn claim(&self, id: &str) -> bool {
        self.dispatched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.to_string())
    }

    fn release(&self, id: &str) {
        self.dispatched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::InMemoryHost;
    use crate::domain::{Identity, RichEmbed};
    use chrono::Utc;

    fn message(id: &str, channel_id: &str) -> SyntheticMessage {
        SyntheticMessage::new(id, channel_id, Identity::placeholder("U2"), "hello", Utc::now())
    }

    #[test]
    fn test_inject_publishes_message_create() {
        let host = Arc::new(InMemoryHost::new());
        let injector = EventInjector::new(host.clone());

        let msg = message("fake-1-a", "C1").with_embed(RichEmbed::from_fields("Hi", "", ""));
        assert!(injector.inject("C1", msg));

        let (kind, payload) = host.last_published().unwrap();
        assert_eq!(kind, EventKind::MessageCreate);
        assert_eq!(payload["channelId"], "C1");
        assert_eq!(payload["message"]["id"], "fake-1-a");
        assert_eq!(payload["message"]["embeds"][0]["title"], "Hi");
        assert_eq!(payload["optimistic"], false);
        assert_eq!(payload["isPushNotification"], false);
        assert_eq!(payload["sendMessageOptions"], serde_json::json!({}));
    }

    #[test]
    fn test_distinct_messages_both_dispatched() {
        let host = Arc::new(InMemoryHost::new());
        let injector = EventInjector::new(host.clone());

        assert!(injector.inject("C1", message("fake-1-a", "C1")));
        assert!(injector.inject("C1", message("fake-1-b", "C1")));
        assert_eq!(host.published_count(), 2);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let host = Arc::new(InMemoryHost::new());
        let injector = EventInjector::new(host.clone());

        assert!(injector.inject("C1", message("fake-1-a", "C1")));
        assert!(!injector.inject("C1", message("fake-1-a", "C1")));
        assert_eq!(host.published_count(), 1);
    }

    #[test]
    fn test_channel_mismatch_rejected() {
        let host = Arc::new(InMemoryHost::new());
        let injector = EventInjector::new(host.clone());

        assert!(!injector.inject("C2", message("fake-1-a", "C1")));
        assert_eq!(host.published_count(), 0);
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let mut host = InMemoryHost::new();
        host.version = SUPPORTED_SINK_VERSION + 1;
        let host = Arc::new(host);
        let injector = EventInjector::new(host.clone());

        assert!(!injector.inject("C1", message("fake-1-a", "C1")));
        assert_eq!(host.published_count(), 0);
    }

    #[test]
    fn test_host_failure_returns_false_and_allows_retry() {
        let mut host = InMemoryHost::new();
        host.fail_publish = true;
        let injector = EventInjector::new(Arc::new(host));

        assert!(!injector.inject("C1", message("fake-1-a", "C1")));

        let healthy = Arc::new(InMemoryHost::new());
        let injector = EventInjector {
            sink: healthy.clone(),
            dispatched: injector.dispatched,
        };
        assert!(injector.inject("C1", message("fake-1-a", "C1")));
        assert_eq!(healthy.published_count(), 1);
    }

    /// Sink whose first publish injects again through the same injector
    struct ReentrantSink {
        injector: std::sync::OnceLock<std::sync::Weak<EventInjector<ReentrantSink>>>,
        nested: Mutex<Vec<bool>>,
        published: Mutex<Vec<String>>,
    }

    impl EventSink for ReentrantSink {
        fn version(&self) -> u32 {
            SUPPORTED_SINK_VERSION
        }

        fn publish(
            &self,
            _kind: EventKind,
            payload: serde_json::Value,
        ) -> Result<(), crate::domain::DomainError> {
            let id = payload["message"]["id"].as_str().unwrap_or_default().to_string();
            let first = {
                let mut published = self.published.lock().unwrap();
                published.push(id.clone());
                published.len() == 1
            };

            if first {
                if let Some(injector) = self.injector.get().and_then(|w| w.upgrade()) {
                    let again = injector.inject("C1", message(&id, "C1"));
                    let other = injector.inject("C1", message("fake-1-b", "C1"));
                    self.nested.lock().unwrap().extend([again, other]);
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_inject_from_inside_publish_does_not_block() {
        let sink = Arc::new(ReentrantSink {
            injector: std::sync::OnceLock::new(),
            nested: Mutex::new(Vec::new()),
            published: Mutex::new(Vec::new()),
        });
        let injector = Arc::new(EventInjector::new(sink.clone()));
        let _ = sink.injector.set(Arc::downgrade(&injector));

        assert!(injector.inject("C1", message("fake-1-a", "C1")));

        assert_eq!(*sink.nested.lock().unwrap(), vec![false, true]);
        assert_eq!(*sink.published.lock().unwrap(), vec!["fake-1-a", "fake-1-b"]);
    }
}
