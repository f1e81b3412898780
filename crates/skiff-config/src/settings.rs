use serde::{Deserialize, Serialize};

/// How the cookie store treats incoming cookies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CookiePolicy {
    AcceptNever,
    AcceptNoThirdParty,
    AcceptAlways,
}

impl CookiePolicy {
    /// Single-letter encoding used in the policy rotation string and in
    /// the window title status block.
    pub fn as_char(self) -> char {
        match self {
            CookiePolicy::AcceptNever => 'a',
            CookiePolicy::AcceptNoThirdParty => '@',
            CookiePolicy::AcceptAlways => 'A',
        }
    }

    /// Unknown letters fall back to accept-always.
    pub fn from_char(c: char) -> Self {
        match c {
            'a' => CookiePolicy::AcceptNever,
            '@' => CookiePolicy::AcceptNoThirdParty,
            _ => CookiePolicy::AcceptAlways,
        }
    }
}

/// Process-wide toggle and session state, shared by all clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ordered rotation of cookie policy letters.
    pub cookie_policies: String,
    /// Current index into `cookie_policies`.
    pub cookie_policy: usize,

    pub load_images: bool,
    pub enable_javascript: bool,
    pub enable_plugins: bool,
    pub enable_java: bool,
    pub enable_inspector: bool,
    pub allow_geolocation: bool,
    pub caret_browsing: bool,
    pub strict_tls: bool,

    /// Ignore all keybindings.
    pub kiosk_mode: bool,
    /// Encode toggle/page status into the window title.
    pub show_indicators: bool,
    pub run_fullscreen: bool,
    /// Print the new client's id to stdout at creation.
    pub show_window_id: bool,

    pub zoom_level: f64,
    pub default_font_size: u32,
    pub user_agent: String,

    pub cookie_file: String,
    pub style_file: String,
    pub script_file: String,
    pub download_dir: String,

    /// Host container handle to embed into, passed through to new
    /// windows.
    pub embed: Option<String>,

    /// Positional URI to open at startup; never persisted.
    #[serde(skip)]
    pub start_uri: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cookie_policies: "@aA".into(),
            cookie_policy: 0,
            load_images: true,
            enable_javascript: true,
            enable_plugins: true,
            enable_java: true,
            enable_inspector: true,
            allow_geolocation: true,
            caret_browsing: false,
            strict_tls: false,
            kiosk_mode: false,
            show_indicators: true,
            run_fullscreen: false,
            show_window_id: false,
            zoom_level: 1.0,
            default_font_size: 16,
            user_agent: concat!(
                "Mozilla/5.0 (X11; U; Unix; en-US) ",
                "AppleWebKit/537.36 (KHTML, like Gecko) ",
                "Safari/537.36 Skiff/",
                env!("CARGO_PKG_VERSION"),
            )
            .into(),
            cookie_file: "~/.skiff/cookies.txt".into(),
            style_file: "~/.skiff/style.css".into(),
            script_file: "~/.skiff/script.js".into(),
            download_dir: "~/".into(),
            embed: None,
            start_uri: None,
        }
    }
}

impl Settings {
    /// Current cookie policy letter, shown in the title status block.
    pub fn cookie_policy_char(&self) -> char {
        self.cookie_policies
            .chars()
            .nth(self.cookie_policy)
            .unwrap_or('A')
    }

    pub fn cookie_policy(&self) -> CookiePolicy {
        CookiePolicy::from_char(self.cookie_policy_char())
    }

    /// Advance to the next policy in the rotation. Takes effect for the
    /// next request; no reload is required.
    pub fn rotate_cookie_policy(&mut self) -> CookiePolicy {
        let len = self.cookie_policies.chars().count();
        if len > 0 {
            self.cookie_policy = (self.cookie_policy + 1) % len;
        }
        self.cookie_policy()
    }

    /// User agent for a client created now. The environment override is
    /// honored at client-creation time only.
    pub fn user_agent_for_new_client(&self) -> String {
        std::env::var("SKIFF_USERAGENT").unwrap_or_else(|_| self.user_agent.clone())
    }
}
