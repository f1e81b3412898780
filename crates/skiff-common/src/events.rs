//! Event types flowing through the single-threaded shell loop.

use serde::{Deserialize, Serialize};

use crate::id::ClientId;

/// A named control slot attached to one client window.
///
/// Slot names are part of the wire contract with external tools: each
/// slot is a file in the client's control directory, and the wire names
/// mirror the file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// Pending search text; any external write triggers search-or-repeat.
    Find,
    /// A URI or bare host/path to navigate to.
    Go,
    /// The current committed URI, written by this process for readback.
    Uri,
}

impl Slot {
    /// File name of this slot inside a client control directory.
    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Find => "find",
            Slot::Go => "go",
            Slot::Uri => "uri",
        }
    }

    /// Advertised wire name, for diagnostics and external tooling docs.
    pub fn wire_name(self) -> &'static str {
        match self {
            Slot::Find => "_SKIFF_FIND",
            Slot::Go => "_SKIFF_GO",
            Slot::Uri => "_SKIFF_URI",
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        match name {
            "find" => Some(Slot::Find),
            "go" => Some(Slot::Go),
            "uri" => Some(Slot::Uri),
            _ => None,
        }
    }
}

/// The pointer-target state of one client.
///
/// All three fields describe a single hover target and are always
/// replaced together; a pointer-target change never updates them
/// piecemeal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hover {
    /// Link target under the pointer, if any.
    pub uri: Option<String>,
    /// Link title (or text label) under the pointer.
    pub title: Option<String>,
    /// Image or media source associated with the hovered element.
    pub content: Option<String>,
}

impl Hover {
    /// A cleared hover state (pointer left any annotated target).
    pub fn clear() -> Self {
        Self::default()
    }

    pub fn is_clear(&self) -> bool {
        self.uri.is_none() && self.title.is_none() && self.content.is_none()
    }
}

/// Permission kinds the engine may ask the shell to decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionKind {
    Geolocation,
}

/// Events emitted by the rendering engine, re-entering the shell loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A new load cycle began; progress and per-load flags reset.
    LoadStarted,
    /// Navigation was confirmed. Carries the committed URI and the
    /// transport security of the committed response.
    LoadCommitted {
        uri: String,
        secure: bool,
        secure_failed: bool,
    },
    /// The load finished (or failed); progress is forced to 100.
    LoadFinished,
    /// Estimated load progress, 0-100.
    Progress(u8),
    /// Document title changed.
    TitleChanged(String),
    /// The pointer target changed; the whole hover group is replaced.
    HoverChanged(Hover),
    /// An insecure sub-resource was observed on a secure page.
    InsecureContent,
    /// The page asked for a new top-level window for this URI.
    OpenWindow { uri: String },
    /// The engine cannot display this content; hand it to a downloader.
    DownloadRequested { uri: String },
    /// The page requested a permission the shell decides globally.
    PermissionRequested { kind: PermissionKind },
}

/// The one event type the shell event loop consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    /// An engine callback result for one client.
    Engine {
        client: ClientId,
        event: EngineEvent,
    },
    /// A control slot owned by `client` was written by another process.
    Channel { client: ClientId, slot: Slot },
}
