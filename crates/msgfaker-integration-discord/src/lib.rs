//! Discord Integration for msgfaker
//!
//! Host adapter for a Discord client: the user, private channel and
//! message stores, and the Flux-style dispatcher that feeds them.
//!
//! # Usage
//!
//! ```rust,ignore
//! use msgfaker::{ConsoleRegistry, FakerSettings};
//! use msgfaker_integration_discord::{DiscordStore, HostSnapshot, MessageFakerPlugin};
//!
//! let store = Arc::new(DiscordStore::from_snapshot(snapshot));
//! let plugin = MessageFakerPlugin::new(store);
//! plugin.on_load(&registry)?;
//! let outcome = plugin.send(&settings).await;
//! ```

mod dispatcher;
mod model;
mod plugin;
mod store;

pub use dispatcher::{ActionHandler, DiscordDispatcher, DISPATCHER_VERSION};
pub use model::{DiscordChannel, DiscordMessage, DiscordUser, HostSnapshot};
pub use plugin::{DiscordFakerService, MessageFakerPlugin};
pub use store::DiscordStore;
