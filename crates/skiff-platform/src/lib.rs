//! Platform layer: keybinding dispatch, the property channel, and
//! detached process spawning.

pub mod channel;
pub mod keymap;
pub mod spawn;
pub mod table;

pub use channel::{watch, ChannelWatcher, PropertyChannel};
pub use keymap::{parse_keybind, KeyBind, Modifier};
pub use spawn::{spawn, ChildReaper};
pub use table::{ActionTable, Binding, KeyCombo, MOD_ALT, MOD_CTRL, MOD_SHIFT, MOD_SUPER};
