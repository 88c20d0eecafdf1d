//! Message Faker plugin
//!
//! Composition root for a Discord client: wires the stores and dispatcher
//! into a [`FakerService`] and manages the console surface.

use std::sync::Arc;

use msgfaker::{
    ConsoleRegistry, DomainError, FakerService, FakerSettings, IdentityDirectory, SendOutcome,
    CONSOLE_NAME,
};
use tracing::info;

use crate::dispatcher::DiscordDispatcher;
use crate::store::DiscordStore;

/// Faker service bound to the Discord stores
pub type DiscordFakerService = FakerService<DiscordStore, DiscordStore, DiscordDispatcher>;

/// Plugin instance for one client session
pub struct MessageFakerPlugin {
    store: Arc<DiscordStore>,
    service: Arc<DiscordFakerService>,
}

impl MessageFakerPlugin {
    /// Create the plugin with a dispatcher feeding `store`
    pub fn new(store: Arc<DiscordStore>) -> Self {
        let dispatcher = Arc::new(DiscordDispatcher::with_store(store.clone()));
        Self::with_dispatcher(store, dispatcher)
    }

    pub fn with_dispatcher(store: Arc<DiscordStore>, dispatcher: Arc<DiscordDispatcher>) -> Self {
        let service = Arc::new(FakerService::new(store.clone(), store.clone(), dispatcher));
        Self { store, service }
    }

    pub fn store(&self) -> &Arc<DiscordStore> {
        &self.store
    }

    pub fn service(&self) -> &Arc<DiscordFakerService> {
        &self.service
    }

    /// Install the console surface
    pub fn on_load(&self, registry: &ConsoleRegistry) -> Result<(), DomainError> {
        registry.install(CONSOLE_NAME, self.service.clone())?;
        info!("[Message Faker] Plugin loaded successfully!");
        Ok(())
    }

    /// Remove the console surface
    pub fn on_unload(&self, registry: &ConsoleRegistry) {
        registry.uninstall(CONSOLE_NAME);
        info!("[Message Faker] Plugin unloaded successfully!");
    }

    pub async fn send(&self, settings: &FakerSettings) -> SendOutcome {
        self.service.send(settings).await
    }

    /// Settings that send a test message from the current user to themself
    pub fn quick_test_settings(&self) -> Result<FakerSettings, DomainError> {
        self.store
            .current_user_id()
            .map(FakerSettings::quick_test)
            .ok_or_else(|| DomainError::HostUnavailable("Could not get current user".into()))
    }
}
