//! # Messages
//!
//! The record shown in a room's scrollback. The view layer treats it as
//! opaque data; only the core creates new ones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a message came from. Drives styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Sent from this terminal
    Local,
    /// Sent by another participant
    Remote,
    /// Room notices (joins, leaves)
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub author: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub origin: Origin,
}

impl Message {
    /// Build an outgoing message stamped with a fresh id and the current time.
    pub fn outgoing(author: &str, body: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            author: author.to_string(),
            body,
            sent_at: Utc::now(),
            origin: Origin::Local,
        }
    }

    pub fn system(body: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            author: "huddle".to_string(),
            body: body.into(),
            sent_at: Utc::now(),
            origin: Origin::System,
        }
    }
}
