//! Process-wide settings for the skiff shell.
//!
//! One [`Settings`] value is shared by every client in the process; the
//! underlying engine settings object is process-scoped, so toggling an
//! option here affects all windows at once. Settings come from the
//! optional TOML config file, overridden by command-line flags.

pub mod loader;
pub mod paths;
pub mod settings;

pub use loader::{default_config_path, load_default, load_from_path};
pub use settings::{CookiePolicy, Settings};
