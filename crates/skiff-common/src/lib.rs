pub mod actions;
pub mod errors;
pub mod events;
pub mod id;

pub use actions::{Action, WebSetting};
pub use errors::{ConfigError, PlatformError, ShellError};
pub use events::{EngineEvent, Hover, PermissionKind, ShellEvent, Slot};
pub use id::ClientId;

pub type Result<T> = std::result::Result<T, ShellError>;
