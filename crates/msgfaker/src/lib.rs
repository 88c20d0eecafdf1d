//! msgfaker Domain Library
//!
//! Fabricates message records on the client and injects them into a chat
//! client's event pipeline, so its stores and renderer treat them like
//! messages delivered by the server. Nothing is sent over the network.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure entities and logic
//!   - `entities/`: SyntheticMessage, RichEmbed, Identity, DirectChannel, FakerSettings
//!   - `value_objects/`: EventKind, ChannelKind, synthetic message ids
//!   - `services/`: MonotonicClock
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces to the host client
//!   (IdentityDirectory, ConversationDirectory, EventSink, Clock)
//!
//! - **Application** (`application/`): MessageFabricator, ConversationResolver,
//!   EventInjector, FakerService and the console surface
//!
//! # Usage
//!
//! ```rust,ignore
//! use msgfaker::{FakerService, FakerSettings};
//!
//! let service = FakerService::new(users, channels, dispatcher);
//! let outcome = service.send(&FakerSettings::quick_test("1234")).await;
//! println!("{}", outcome.notice());
//! ```

pub mod application;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use application::{
    ConsoleApi, ConsoleRegistry, ConversationResolver, EventInjector, FakerService,
    MessageFabricator, SendOutcome, CONSOLE_NAME,
};
pub use domain::{
    is_synthetic_message_id, synthetic_message_id, ChannelKind, DirectChannel, DomainError,
    EmbedImage, EventKind, FakerSettings, Identity, MonotonicClock, RichEmbed, SyntheticMessage,
    UserRecord, EMBED_ACCENT_COLOR,
};
pub use ports::{
    Clock, ConversationDirectory, EventSink, IdentityDirectory, SystemClock,
    SUPPORTED_SINK_VERSION,
};
