//! Event Sink Port
//!
//! The single seam through which this crate mutates host state. Every
//! assumption about the host's dispatcher internals lives behind an
//! implementation of [`EventSink`], so a host upgrade only touches the
//! adapter.

use crate::domain::{errors::DomainError, EventKind};

/// Adapter contract version the injector is written against
pub const SUPPORTED_SINK_VERSION: u32 = 1;

/// Host event-dispatch pipeline
///
/// # Example
///
/// ```rust,ignore
/// use msgfaker::ports::EventSink;
///
/// struct FluxSink { /* host dispatcher handle */ }
///
/// impl EventSink for FluxSink {
///     fn version(&self) -> u32 {
///         1
///     }
///
///     fn publish(&self, kind: EventKind, payload: serde_json::Value) -> Result<(), DomainError> {
///         // Hand the action to the host dispatcher
///     }
/// }
/// ```
pub trait EventSink: Send + Sync {
    /// Contract version implemented by this adapter
    fn version(&self) -> u32;

    /// Publish one event to the host
    ///
    /// `payload` carries the event fields except the kind itself.
    /// Returns `DomainError::HostIncompatible` when the host does not accept
    /// the event in this shape.
    fn publish(&self, kind: EventKind, payload: serde_json::Value) -> Result<(), DomainError>;
}
