use serde::{Deserialize, Serialize};

/// A per-page engine setting that can be flipped at runtime.
///
/// Flipping one of these changes the process-wide settings object, so it
/// affects every window in the process and needs a reload to become
/// visible on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebSetting {
    CaretBrowsing,
    LoadImages,
    Javascript,
    Plugins,
}

/// Every operation a keybinding or external control write can trigger.
///
/// The action table and the property-channel dispatcher both resolve to
/// this enum; the app event loop matches on it to drive a client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    // -- Navigation --
    /// Reload the current page, optionally bypassing the cache.
    Reload { bypass_cache: bool },
    /// Cancel the in-flight load.
    Stop,
    /// Step through history: negative is back, positive is forward.
    Navigate(i32),

    // -- View --
    /// Zoom step: negative out, positive in, zero resets to 1.0.
    Zoom(i32),
    /// Scroll vertically by tenths of the viewport height.
    ScrollVertical(i32),
    /// Scroll horizontally by tenths of the viewport width.
    ScrollHorizontal(i32),
    ToggleFullscreen,
    ToggleInspector,
    Print,

    // -- Search --
    /// Launch the external prompt that fills the GO slot.
    PromptGo,
    /// Launch the external prompt that fills the FIND slot.
    PromptFind,
    /// Search for the FIND slot text, or step to the next/previous hit.
    Find { forward: bool },

    // -- Clipboard --
    /// Paste the selection as a navigation target, or copy the
    /// current/hovered URI to the selection.
    Clipboard { paste: bool },

    // -- Toggles --
    Toggle(WebSetting),
    ToggleCookiePolicy,
    ToggleGeolocation,
    ToggleStyle,

    // -- Windows --
    /// Open a new top-level window (a fresh OS process).
    NewWindow,
}

impl Action {
    /// Short human-readable label, used in logging.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Reload { bypass_cache: true } => "Reload (bypass cache)",
            Action::Reload { bypass_cache: false } => "Reload",
            Action::Stop => "Stop",
            Action::Navigate(n) if *n < 0 => "History Back",
            Action::Navigate(_) => "History Forward",
            Action::Zoom(0) => "Zoom Reset",
            Action::Zoom(n) if *n < 0 => "Zoom Out",
            Action::Zoom(_) => "Zoom In",
            Action::ScrollVertical(_) => "Scroll Vertical",
            Action::ScrollHorizontal(_) => "Scroll Horizontal",
            Action::ToggleFullscreen => "Toggle Fullscreen",
            Action::ToggleInspector => "Toggle Inspector",
            Action::Print => "Print",
            Action::PromptGo => "Open URL Prompt",
            Action::PromptFind => "Open Search Prompt",
            Action::Find { forward: true } => "Find Next",
            Action::Find { forward: false } => "Find Previous",
            Action::Clipboard { paste: true } => "Paste URL",
            Action::Clipboard { paste: false } => "Copy URL",
            Action::Toggle(WebSetting::CaretBrowsing) => "Toggle Caret Browsing",
            Action::Toggle(WebSetting::LoadImages) => "Toggle Images",
            Action::Toggle(WebSetting::Javascript) => "Toggle JavaScript",
            Action::Toggle(WebSetting::Plugins) => "Toggle Plugins",
            Action::ToggleCookiePolicy => "Rotate Cookie Policy",
            Action::ToggleGeolocation => "Toggle Geolocation",
            Action::ToggleStyle => "Toggle User Stylesheet",
            Action::NewWindow => "New Window",
        }
    }
}
