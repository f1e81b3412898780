use serde::{Deserialize, Serialize};
use std::fmt;

/// The addressable identity of one client window.
///
/// This token names the client's control directory on the property
/// channel, so it must be filesystem-safe and printable. It is also
/// what `show_window_id` prints for external tools.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(String);

impl ClientId {
    /// Allocate a fresh id for a new client.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Rehydrate an id observed externally (e.g. a control dir name).
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
