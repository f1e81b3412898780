//! One browsing window: page state plus its engine.

use skiff_common::{ClientId, Result, WebSetting};
use skiff_config::Settings;
use tracing::debug;

use crate::engine::WebEngine;
use crate::state::PageState;

const ZOOM_STEP: f64 = 0.1;

pub struct Client {
    pub id: ClientId,
    pub state: PageState,
    engine: Box<dyn WebEngine>,
    /// User stylesheet currently applied to this window.
    pub styled: bool,
    inspecting: bool,
    zoom: f64,
    last_search: String,
}

impl Client {
    pub fn new(id: ClientId, engine: Box<dyn WebEngine>, settings: &Settings) -> Self {
        Self {
            id,
            state: PageState::default(),
            engine,
            styled: false,
            inspecting: false,
            zoom: settings.zoom_level,
            last_search: String::new(),
        }
    }

    pub fn engine(&self) -> &dyn WebEngine {
        self.engine.as_ref()
    }

    /// Navigate to a raw target from the GO slot or the command line.
    ///
    /// An existing filesystem path becomes a `file://` URI, a target
    /// without a scheme gets `http://`, and anything else passes
    /// through. Navigating to the page already shown reloads it
    /// instead, so external writers looping the current URI back do
    /// not spin. Returns the normalized URI, or `None` for an empty
    /// target, which is ignored.
    pub fn load_uri(&mut self, raw: &str) -> Result<Option<String>> {
        if raw.is_empty() {
            return Ok(None);
        }

        let uri = match std::fs::canonicalize(raw) {
            Ok(path) => format!("file://{}", path.display()),
            Err(_) if raw.contains("://") || raw.starts_with("about:") => raw.to_string(),
            Err(_) => format!("http://{raw}"),
        };

        if !self.state.uri.is_empty() && uri == self.state.uri {
            self.engine.reload(false)?;
        } else {
            debug!("client {} loading {uri}", self.id);
            self.engine.load_uri(&uri)?;
        }
        Ok(Some(uri))
    }

    pub fn reload(&self, bypass_cache: bool) -> Result<()> {
        self.engine.reload(bypass_cache)
    }

    pub fn stop(&self) -> Result<()> {
        self.engine.stop()
    }

    pub fn navigate(&self, steps: i32) -> Result<()> {
        self.engine.history(steps)
    }

    /// Search for text from the FIND slot. The same text again repeats
    /// the search in the given direction; new text starts over.
    pub fn find(&mut self, text: &str, forward: bool) -> Result<()> {
        if text != self.last_search {
            self.last_search = text.to_string();
        }
        self.engine.search(&self.last_search, forward)
    }

    /// Repeat the previous search without consulting the slot.
    pub fn find_again(&self, forward: bool) -> Result<()> {
        self.engine.search(&self.last_search, forward)
    }

    /// Step the zoom level: negative out, positive in, zero resets.
    pub fn zoom(&mut self, direction: i32) -> Result<()> {
        self.zoom = match direction {
            d if d < 0 => self.zoom - ZOOM_STEP,
            d if d > 0 => self.zoom + ZOOM_STEP,
            _ => 1.0,
        };
        self.engine.set_zoom(self.zoom)
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom
    }

    pub fn scroll_vertical(&self, step: i32) -> Result<()> {
        self.engine.eval(&format!(
            "window.scrollBy(0, {step} * (window.innerHeight / 10))"
        ))
    }

    pub fn scroll_horizontal(&self, step: i32) -> Result<()> {
        self.engine.eval(&format!(
            "window.scrollBy({step} * (window.innerWidth / 10), 0)"
        ))
    }

    /// Toggle the user stylesheet for this window only.
    pub fn toggle_style(&mut self, css: &str) -> Result<()> {
        if self.styled {
            self.engine.clear_style()?;
        } else {
            self.engine.inject_style(css)?;
        }
        self.styled = !self.styled;
        Ok(())
    }

    pub fn apply_setting(&self, setting: WebSetting, enabled: bool) -> Result<()> {
        self.engine.apply_setting(setting, enabled)
    }

    pub fn toggle_inspector(&mut self) -> Result<()> {
        self.inspecting = !self.inspecting;
        self.engine.show_inspector(self.inspecting)
    }

    pub fn print(&self) -> Result<()> {
        self.engine.print()
    }
}
