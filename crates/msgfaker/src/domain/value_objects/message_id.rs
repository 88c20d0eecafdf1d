//! Synthetic message identifiers
//!
//! `fake-<unix millis>-<32 hex chars>`. The prefix can never parse as a
//! snowflake, so a synthetic id cannot collide with a delivered message id.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Prefix shared by every synthetic message id
pub const SYNTHETIC_ID_PREFIX: &str = "fake";

/// Generate a new synthetic message id stamped with `at`
pub fn synthetic_message_id(at: DateTime<Utc>) -> String {
    format!(
        "{}-{}-{}",
        SYNTHETIC_ID_PREFIX,
        at.timestamp_millis(),
        Uuid::new_v4().simple()
    )
}

/// Check whether `id` was produced by [`synthetic_message_id`]
pub fn is_synthetic_message_id(id: &str) -> bool {
    let Some(rest) = id
        .strip_prefix(SYNTHETIC_ID_PREFIX)
        .and_then(|r| r.strip_prefix('-'))
    else {
        return false;
    };

    match rest.split_once('-') {
        Some((millis, suffix)) => {
            !millis.is_empty()
                && millis.bytes().all(|b| b.is_ascii_digit())
                && suffix.len() == 32
                && suffix.bytes().all(|b| b.is_ascii_hexdigit())
        }
        None => false,
    }
}
