//! EventKind - Action types understood by the host dispatcher

use serde::{Deserialize, Serialize};

/// Kind of event published to the host's dispatch pipeline
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// A message arrived in a channel
    MessageCreate,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::MessageCreate => "MESSAGE_CREATE",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_wire_name() {
        assert_eq!(EventKind::MessageCreate.to_string(), "MESSAGE_CREATE");
        assert_eq!(
            serde_json::to_value(EventKind::MessageCreate).unwrap(),
            serde_json::json!("MESSAGE_CREATE")
        );
    }
}
