//! Discord client dispatcher
//!
//! Flux-style dispatcher: actions are JSON objects tagged with a `type`,
//! handed synchronously to every handler registered for that type.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use msgfaker::{DomainError, EventKind, EventSink};
use tracing::{debug, warn};

use crate::store::DiscordStore;

/// Contract version of the [`EventSink`] implementation below
pub const DISPATCHER_VERSION: u32 = 1;

/// Store callback for one action type
pub type ActionHandler = Arc<dyn Fn(&serde_json::Value) -> Result<(), DomainError> + Send + Sync>;

/// Clears the in-dispatch flag when the dispatch ends, even by panic
struct DispatchGuard<'a>(&'a AtomicBool);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Action dispatcher of a Discord client
#[derive(Default)]
pub struct DiscordDispatcher {
    handlers: RwLock<HashMap<String, Vec<ActionHandler>>>,
    dispatching: AtomicBool,
}

impl DiscordDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher with the message store subscribed to `MESSAGE_CREATE`
    pub fn with_store(store: Arc<DiscordStore>) -> Self {
        let dispatcher = Self::new();
        dispatcher.register(
            EventKind::MessageCreate.as_str(),
            Arc::new(move |action: &serde_json::Value| {
                store.handle_message_create(action)
            }),
        );
        dispatcher
    }

    pub fn register(&self, action_type: &str, handler: ActionHandler) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(action_type.to_string())
            .or_default()
            .push(handler);
    }

    /// Dispatch one action to its handlers
    ///
    /// Dispatching from inside a handler is refused, as in Flux.
    pub fn dispatch(&self, action: &serde_json::Value) -> Result<(), DomainError> {
        let action_type = action
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| DomainError::HostIncompatible("Action without type".into()))?;

        let handlers = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(action_type)
            .cloned()
            .unwrap_or_default();

        if handlers.is_empty() {
            warn!(action_type = %action_type, "No handler registered for action");
            return Err(DomainError::HostIncompatible(format!(
                "No handler registered for {}",
                action_type
            )));
        }

        if self.dispatching.swap(true, Ordering::SeqCst) {
            return Err(DomainError::Conflict(
                "Cannot dispatch in the middle of a dispatch".into(),
            ));
        }
        let _guard = DispatchGuard(&self.dispatching);

        debug!(action_type = %action_type, handlers = handlers.len(), "Dispatching action");
        handlers.iter().try_for_each(|handler| handler(action))
    }
}

impl EventSink for DiscordDispatcher {
    fn version(&self) -> u32 {
        DISPATCHER_VERSION
    }

    fn publish(&self, kind: EventKind, payload: serde_json::Value) -> Result<(), DomainError> {
        let serde_json::Value::Object(mut action) = payload else {
            return Err(DomainError::HostIncompatible(format!(
                "{} payload must be an object",
                kind
            )));
        };
        action.insert("type".into(), serde_json::Value::from(kind.as_str()));
        self.dispatch(&serde_json::Value::Object(action))
    }
}
