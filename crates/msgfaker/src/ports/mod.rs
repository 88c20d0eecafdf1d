//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! reads from and writes to the host client.
//!
//! Implementations of these traits live in integration crates
//! (e.g., msgfaker-integration-discord).

mod clock;
mod conversation_directory;
mod event_sink;
mod identity_directory;

// Re-exports
pub use clock::*;
pub use conversation_directory::*;
pub use event_sink::*;
pub use identity_directory::*;
