//! Identity Entity
//!
//! Author of a synthetic message. Either a record from the host's identity
//! directory or a placeholder built from a bare id.

use serde::{Deserialize, Serialize, Serializer};

/// Username shown for authors missing from the directory
pub const PLACEHOLDER_USERNAME: &str = "Unknown User";
/// Discriminator shown for authors missing from the directory
pub const PLACEHOLDER_DISCRIMINATOR: &str = "0000";

/// A user as known by the host's identity directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    /// Display name
    pub username: String,
    #[serde(default = "default_discriminator")]
    pub discriminator: String,
    /// Avatar hash or URL
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

fn default_discriminator() -> String {
    PLACEHOLDER_DISCRIMINATOR.to_string()
}

impl UserRecord {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            discriminator: default_discriminator(),
            avatar: None,
            bot: false,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn with_bot(mut self, bot: bool) -> Self {
        self.bot = bot;
        self
    }
}

/// Author identity of a synthetic message
///
/// Placeholders only live inside the message they were built for; they are
/// never written back to the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Found in the identity directory
    Known(UserRecord),
    /// Not in the directory, only the requested id is known
    Placeholder { id: String },
}

impl Identity {
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self::Placeholder { id: id.into() }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Known(user) => &user.id,
            Self::Placeholder { id } => id,
        }
    }

    pub fn username(&self) -> &str {
        match self {
            Self::Known(user) => &user.username,
            Self::Placeholder { .. } => PLACEHOLDER_USERNAME,
        }
    }

    pub fn discriminator(&self) -> &str {
        match self {
            Self::Known(user) => &user.discriminator,
            Self::Placeholder { .. } => PLACEHOLDER_DISCRIMINATOR,
        }
    }

    pub fn avatar(&self) -> Option<&str> {
        match self {
            Self::Known(user) => user.avatar.as_deref(),
            Self::Placeholder { .. } => None,
        }
    }

    pub fn is_bot(&self) -> bool {
        match self {
            Self::Known(user) => user.bot,
            Self::Placeholder { .. } => false,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}

/// Wire shape of a placeholder author
#[derive(Serialize)]
struct PlaceholderAuthor<'a> {
    id: &'a str,
    username: &'a str,
    discriminator: &'a str,
    avatar: Option<&'a str>,
    bot: bool,
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(user) => user.serialize(serializer),
            Self::Placeholder { id } => PlaceholderAuthor {
                id,
                username: PLACEHOLDER_USERNAME,
                discriminator: PLACEHOLDER_DISCRIMINATOR,
                avatar: None,
                bot: false,
            }
            .serialize(serializer),
        }
    }
}
