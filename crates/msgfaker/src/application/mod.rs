//! Application Layer (Use Cases)
//!
//! Orchestrates the fabricate / resolve / inject steps against the
//! host ports, and exposes them on the console surface.

mod console;
mod fabricator;
mod faker_service;
mod injector;
mod resolver;

#[cfg(test)]
pub(crate) mod test_support;

pub use console::{ConsoleApi, ConsoleRegistry, CONSOLE_NAME};
pub use fabricator::MessageFabricator;
pub use faker_service::{FakerService, SendOutcome};
pub use injector::EventInjector;
pub use resolver::ConversationResolver;
