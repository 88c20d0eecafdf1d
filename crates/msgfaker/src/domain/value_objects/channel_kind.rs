//! ChannelKind - Classification of private conversations

use serde::{Deserialize, Serialize};

/// Private channel classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// One-to-one conversation
    Direct,
    /// Group conversation with several recipients
    Group,
}
