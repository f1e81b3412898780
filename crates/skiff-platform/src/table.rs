//! The action table and its dispatch rules.
//!
//! A table is a flat list of (modifier-mask, key) -> [`Action`] entries.
//! Dispatch discards modifier bits the table never uses (incidental
//! bits like NumLock must not break matches), folds the key symbol to
//! lower case, and then fires **every** matching entry in table order.

use skiff_common::actions::{Action, WebSetting};

use crate::keymap::{normalize_key_name, parse_keybind, KeyBind, Modifier};

pub const MOD_CTRL: u8 = 0b0001;
pub const MOD_ALT: u8 = 0b0010;
pub const MOD_SHIFT: u8 = 0b0100;
pub const MOD_SUPER: u8 = 0b1000;

/// Canonical (modifier-mask, key) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    /// Bitmask: Ctrl=1, Alt=2, Shift=4, Super=8.
    pub mods: u8,
    /// Lower-cased key name.
    pub key: String,
}

impl KeyCombo {
    pub fn from_keybind(kb: &KeyBind) -> Self {
        let mut mods = 0u8;
        for m in &kb.modifiers {
            mods |= match m {
                Modifier::Ctrl => MOD_CTRL,
                Modifier::Alt => MOD_ALT,
                Modifier::Shift => MOD_SHIFT,
                Modifier::Super => MOD_SUPER,
            };
        }
        Self {
            mods,
            key: kb.key.to_lowercase(),
        }
    }

    /// Build from raw modifier booleans and a raw key name, as reported
    /// by the toolkit.
    pub fn from_parts(ctrl: bool, alt: bool, shift: bool, super_key: bool, key: &str) -> Self {
        let mut mods = 0u8;
        if ctrl {
            mods |= MOD_CTRL;
        }
        if alt {
            mods |= MOD_ALT;
        }
        if shift {
            mods |= MOD_SHIFT;
        }
        if super_key {
            mods |= MOD_SUPER;
        }
        Self {
            mods,
            key: normalize_key_name(key).to_lowercase(),
        }
    }
}

/// One table entry.
#[derive(Debug, Clone)]
pub struct Binding {
    pub combo: KeyCombo,
    pub action: Action,
}

impl Binding {
    /// Panics on a malformed keybind string; the default table is
    /// static data, so this is a programming error, not input.
    fn of(keys: &str, action: Action) -> Self {
        let kb = parse_keybind(keys).unwrap_or_else(|e| panic!("bad binding {keys:?}: {e}"));
        Self {
            combo: KeyCombo::from_keybind(&kb),
            action,
        }
    }
}

/// Static mapping from key combos to actions.
pub struct ActionTable {
    bindings: Vec<Binding>,
    /// Union of all modifier bits any entry uses.
    mod_mask: u8,
}

impl ActionTable {
    pub fn new(bindings: Vec<Binding>) -> Self {
        let mod_mask = bindings.iter().fold(0, |mask, b| mask | b.combo.mods);
        Self { bindings, mod_mask }
    }

    /// Discard modifier bits the table never uses.
    pub fn normalize(&self, mods: u8) -> u8 {
        mods & self.mod_mask
    }

    /// All actions bound to this key press, in table order.
    pub fn dispatch(&self, mods: u8, key: &str) -> Vec<&Action> {
        let mods = self.normalize(mods);
        let key = key.to_lowercase();
        self.bindings
            .iter()
            .filter(|b| b.combo.mods == mods && b.combo.key == key)
            .map(|b| &b.action)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The stock bindings.
    pub fn defaults() -> Self {
        Self::new(vec![
            Binding::of("Ctrl+Shift+R", Action::Reload { bypass_cache: true }),
            Binding::of("Ctrl+R", Action::Reload { bypass_cache: false }),
            Binding::of("Ctrl+Shift+P", Action::Print),
            Binding::of("Ctrl+P", Action::Clipboard { paste: true }),
            Binding::of("Ctrl+Y", Action::Clipboard { paste: false }),
            Binding::of("Ctrl+Shift+J", Action::Zoom(-1)),
            Binding::of("Ctrl+Shift+K", Action::Zoom(1)),
            Binding::of("Ctrl+Shift+Q", Action::Zoom(0)),
            Binding::of("Ctrl+Minus", Action::Zoom(-1)),
            Binding::of("Ctrl+Plus", Action::Zoom(1)),
            Binding::of("Ctrl+L", Action::Navigate(1)),
            Binding::of("Ctrl+H", Action::Navigate(-1)),
            Binding::of("Ctrl+J", Action::ScrollVertical(1)),
            Binding::of("Ctrl+K", Action::ScrollVertical(-1)),
            Binding::of("Ctrl+B", Action::ScrollVertical(-10000)),
            Binding::of("Ctrl+Space", Action::ScrollVertical(10000)),
            Binding::of("Ctrl+I", Action::ScrollHorizontal(1)),
            Binding::of("Ctrl+U", Action::ScrollHorizontal(-1)),
            Binding::of("F11", Action::ToggleFullscreen),
            Binding::of("Escape", Action::Stop),
            Binding::of("Ctrl+Shift+O", Action::ToggleInspector),
            Binding::of("Ctrl+G", Action::PromptGo),
            Binding::of("Ctrl+F", Action::PromptFind),
            Binding::of("Ctrl+Slash", Action::PromptFind),
            Binding::of("Ctrl+N", Action::Find { forward: true }),
            Binding::of("Ctrl+Shift+N", Action::Find { forward: false }),
            Binding::of("Ctrl+Shift+C", Action::Toggle(WebSetting::CaretBrowsing)),
            Binding::of("Ctrl+Shift+I", Action::Toggle(WebSetting::LoadImages)),
            Binding::of("Ctrl+Shift+S", Action::Toggle(WebSetting::Javascript)),
            Binding::of("Ctrl+Shift+V", Action::Toggle(WebSetting::Plugins)),
            Binding::of("Ctrl+Shift+A", Action::ToggleCookiePolicy),
            Binding::of("Ctrl+Shift+M", Action::ToggleStyle),
            Binding::of("Ctrl+Shift+G", Action::ToggleGeolocation),
            Binding::of("Ctrl+Shift+W", Action::NewWindow),
        ])
    }
}

impl Default for ActionTable {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ActionTable {
        ActionTable::defaults()
    }

    #[test]
    fn defaults_parse() {
        assert!(!table().is_empty());
    }

    #[test]
    fn default_mask_is_ctrl_shift() {
        // the stock table only binds Ctrl and Shift
        assert_eq!(table().normalize(0xff), MOD_CTRL | MOD_SHIFT);
    }

    #[test]
    fn normalize_ignores_irrelevant_bits() {
        let t = table();
        for mods in 0..=0xffu8 {
            let relevant = mods & (MOD_CTRL | MOD_SHIFT);
            assert_eq!(t.normalize(mods), relevant, "mods={mods:#010b}");
            // idempotent under injection of any irrelevant bits
            assert_eq!(t.normalize(t.normalize(mods)), t.normalize(mods));
        }
    }

    #[test]
    fn dispatch_is_case_insensitive_in_the_key() {
        let t = table();
        assert_eq!(t.dispatch(MOD_CTRL, "R"), t.dispatch(MOD_CTRL, "r"));
        assert_eq!(
            t.dispatch(MOD_CTRL, "R"),
            vec![&Action::Reload { bypass_cache: false }]
        );
    }

    #[test]
    fn shift_carries_case_not_the_symbol() {
        let t = table();
        assert_eq!(
            t.dispatch(MOD_CTRL | MOD_SHIFT, "R"),
            vec![&Action::Reload { bypass_cache: true }]
        );
        assert_eq!(
            t.dispatch(MOD_CTRL | MOD_SHIFT, "r"),
            vec![&Action::Reload { bypass_cache: true }]
        );
    }

    #[test]
    fn incidental_modifier_bits_do_not_break_matches() {
        let t = table();
        // e.g. NumLock mapped into Super/Alt territory
        let noisy = MOD_CTRL | MOD_ALT | MOD_SUPER;
        assert_eq!(
            t.dispatch(noisy, "r"),
            vec![&Action::Reload { bypass_cache: false }]
        );
    }

    #[test]
    fn unbound_key_dispatches_nothing() {
        assert!(table().dispatch(MOD_CTRL, "z").is_empty());
        assert!(table().dispatch(0, "r").is_empty());
    }

    #[test]
    fn bare_key_bindings_match_without_modifiers() {
        let t = table();
        assert_eq!(t.dispatch(0, "Escape"), vec![&Action::Stop]);
        assert_eq!(t.dispatch(0, "F11"), vec![&Action::ToggleFullscreen]);
    }

    #[test]
    fn duplicate_entries_all_fire_in_table_order() {
        let t = ActionTable::new(vec![
            Binding::of("Ctrl+X", Action::Stop),
            Binding::of("Ctrl+X", Action::Print),
        ]);
        assert_eq!(t.dispatch(MOD_CTRL, "x"), vec![&Action::Stop, &Action::Print]);
    }

    #[test]
    fn identical_presses_yield_identical_action_sequences() {
        let t = table();
        let first: Vec<Action> = t.dispatch(MOD_CTRL, "f").into_iter().cloned().collect();
        let second: Vec<Action> = t.dispatch(MOD_CTRL, "f").into_iter().cloned().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn combo_from_parts_matches_from_keybind() {
        let from_parts = KeyCombo::from_parts(true, false, true, false, "A");
        let from_bind = KeyCombo::from_keybind(&parse_keybind("Ctrl+Shift+A").unwrap());
        assert_eq!(from_parts, from_bind);
    }

    #[test]
    fn combo_from_parts_normalizes_named_keys() {
        let combo = KeyCombo::from_parts(true, false, false, false, " ");
        assert_eq!(combo.key, "space");
    }
}
