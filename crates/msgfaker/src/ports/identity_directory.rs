//! Identity Directory Port
//!
//! Read access to the users the host already knows about.

use crate::domain::{errors::DomainError, UserRecord};

/// Host's user directory
///
/// Lookups are synchronous: hosts keep their user cache in memory.
pub trait IdentityDirectory: Send + Sync {
    /// Find a user by id
    ///
    /// `Ok(None)` means the directory has no entry for `user_id`.
    fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, DomainError>;

    /// Id of the signed-in user, if the host has one
    fn current_user_id(&self) -> Option<String> {
        None
    }
}
