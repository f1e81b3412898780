//! Human-readable keybind strings.
//!
//! The default action table is written with strings like `"Ctrl+Shift+R"`
//! or `"F11"`; this module parses them into a [`KeyBind`].

use serde::{Deserialize, Serialize};
use skiff_common::PlatformError;

/// A keyboard modifier key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    Ctrl,
    Alt,
    Shift,
    /// Super / Win / Meta.
    Super,
}

/// Zero or more modifiers plus a key name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBind {
    pub modifiers: Vec<Modifier>,
    pub key: String,
}

/// Parse a keybind string like `"Ctrl+Shift+T"` or `"Escape"`.
///
/// Every token but the last must be a modifier name; the last token is
/// the key and gets normalized (`"Minus"` -> `"-"`, `"Esc"` ->
/// `"Escape"`, single letters lower-cased; case is carried by the
/// Shift modifier, not by the symbol).
pub fn parse_keybind(s: &str) -> Result<KeyBind, PlatformError> {
    let tokens: Vec<&str> = s.split('+').map(str::trim).collect();
    if tokens.iter().all(|t| t.is_empty()) {
        return Err(PlatformError::Keybind("empty keybind string".into()));
    }

    let (key_token, mod_tokens) = tokens.split_last().unwrap();

    let mut modifiers = Vec::new();
    for token in mod_tokens {
        let modifier = parse_modifier(token)
            .ok_or_else(|| PlatformError::Keybind(format!("unrecognized modifier: {token}")))?;
        if !modifiers.contains(&modifier) {
            modifiers.push(modifier);
        }
    }

    if key_token.is_empty() {
        return Err(PlatformError::Keybind("keybind has no key component".into()));
    }

    Ok(KeyBind {
        modifiers,
        key: normalize_key_name(key_token),
    })
}

/// Display form, e.g. `"Ctrl+Shift+r"`; used in logging.
pub fn keybind_to_display(kb: &KeyBind) -> String {
    let mut parts: Vec<&str> = kb
        .modifiers
        .iter()
        .map(|m| match m {
            Modifier::Ctrl => "Ctrl",
            Modifier::Alt => "Alt",
            Modifier::Shift => "Shift",
            Modifier::Super => "Super",
        })
        .collect();
    parts.push(&kb.key);
    parts.join("+")
}

fn parse_modifier(token: &str) -> Option<Modifier> {
    match token.to_lowercase().as_str() {
        "ctrl" | "control" => Some(Modifier::Ctrl),
        "alt" | "option" => Some(Modifier::Alt),
        "shift" => Some(Modifier::Shift),
        "super" | "win" | "meta" => Some(Modifier::Super),
        _ => None,
    }
}

/// Canonical key names. Single characters are lower-cased; named keys
/// keep a fixed capitalized spelling. Toolkit spellings (`" "`,
/// `"ArrowUp"`) fold onto the same names as keybind-string spellings.
pub fn normalize_key_name(token: &str) -> String {
    match token.to_lowercase().as_str() {
        " " => "Space".into(),
        "arrowup" => "Up".into(),
        "arrowdown" => "Down".into(),
        "arrowleft" => "Left".into(),
        "arrowright" => "Right".into(),
        "minus" => "-".into(),
        "plus" => "+".into(),
        "period" => ".".into(),
        "comma" => ",".into(),
        "slash" => "/".into(),
        "space" => "Space".into(),
        "enter" | "return" => "Enter".into(),
        "escape" | "esc" => "Escape".into(),
        "tab" => "Tab".into(),
        "backspace" => "Backspace".into(),
        "delete" | "del" => "Delete".into(),
        "up" => "Up".into(),
        "down" => "Down".into(),
        "left" => "Left".into(),
        "right" => "Right".into(),
        lower => {
            if token.len() == 1 {
                lower.to_string()
            } else if let Some(rest) = lower.strip_prefix('f') {
                // function keys keep their uppercase F
                if rest.chars().all(|c| c.is_ascii_digit()) && !rest.is_empty() {
                    format!("F{rest}")
                } else {
                    lower.to_string()
                }
            } else {
                lower.to_string()
            }
        }
    }
}
