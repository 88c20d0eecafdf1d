//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod channel_kind;
mod event_kind;
mod message_id;

pub use channel_kind::*;
pub use event_kind::*;
pub use message_id::*;
