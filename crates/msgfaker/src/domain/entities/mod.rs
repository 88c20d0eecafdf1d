//! Domain Entities
//!
//! - SyntheticMessage: fabricated message record and its rich embed
//! - Identity: author identity, known or placeholder
//! - DirectChannel: one-to-one conversation known to the host
//! - FakerSettings: persisted inputs of the settings layer

mod channel;
mod identity;
mod message;
mod settings;

pub use channel::*;
pub use identity::*;
pub use message::*;
pub use settings::*;
