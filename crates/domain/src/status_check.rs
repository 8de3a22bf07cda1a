//! Status check records exchanged with the backend under test.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload sent to create a status check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheckCreate {
    /// Name of the client registering the check.
    pub client_name: String,
}

impl StatusCheckCreate {
    /// Creates a payload for the given client name.
    #[must_use]
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
        }
    }
}

/// A status check as returned by the backend.
///
/// The identifier and timestamp are kept as the JSON the server sent, so
/// numeric ids and epoch timestamps round-trip unchanged into later lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheck {
    /// Server-generated identifier.
    pub id: Value,
    /// Client name echoed back by the server.
    pub client_name: String,
    /// Server-side creation time, kept as sent.
    pub timestamp: Value,
}
