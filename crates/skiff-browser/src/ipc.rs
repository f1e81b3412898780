//! IPC bridge between the page and the shell.
//!
//! The init script runs in every page and posts JSON messages through
//! `window.ipc.postMessage`; the shell parses them into engine events.
//! It also exposes `window.__skiff` helpers the shell drives through
//! `evaluate_script` for things the engine has no native surface for
//! (hover reporting, geolocation gating, user stylesheets).

use serde::{Deserialize, Serialize};
use skiff_common::{EngineEvent, Hover};
use tracing::trace;

/// A typed message posted by the bridge script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeMessage {
    pub kind: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl BridgeMessage {
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Translate into an engine event, or `None` for noise.
    pub fn into_event(self) -> Option<EngineEvent> {
        match self.kind.as_str() {
            "hover" => {
                if self.payload.is_null() {
                    return Some(EngineEvent::HoverChanged(Hover::clear()));
                }
                let hover: Hover = serde_json::from_value(self.payload).ok()?;
                Some(EngineEvent::HoverChanged(hover))
            }
            "progress" => {
                let p = self.payload.as_u64()?.min(100) as u8;
                Some(EngineEvent::Progress(p))
            }
            "insecure" => Some(EngineEvent::InsecureContent),
            other => {
                trace!("unknown bridge message kind {other}");
                None
            }
        }
    }
}

/// Injected into every page before any page script runs.
///
/// Hover reporting walks up from the element under the pointer to the
/// nearest anchor and posts the whole target group in one message, so
/// the shell never sees a title from one link paired with the URI of
/// another. Progress is approximated from document readiness.
pub const INIT_SCRIPT: &str = r#"
(function() {
    if (window.__skiff) { return; }

    function post(kind, payload) {
        window.ipc.postMessage(JSON.stringify({
            kind: kind,
            payload: payload === undefined ? null : payload
        }));
    }

    window.__skiff = {
        post: post,

        setStyle: function(css) {
            var el = document.getElementById('__skiff_style');
            if (!el) {
                el = document.createElement('style');
                el.id = '__skiff_style';
                document.documentElement.appendChild(el);
            }
            el.textContent = css;
        },
        clearStyle: function() {
            var el = document.getElementById('__skiff_style');
            if (el) { el.remove(); }
        },

        _geo: navigator.geolocation && {
            getCurrentPosition:
                navigator.geolocation.getCurrentPosition.bind(navigator.geolocation),
            watchPosition:
                navigator.geolocation.watchPosition.bind(navigator.geolocation)
        },
        setGeolocation: function(allowed) {
            if (!navigator.geolocation) { return; }
            var geo = this._geo;
            if (allowed) {
                navigator.geolocation.getCurrentPosition = geo.getCurrentPosition;
                navigator.geolocation.watchPosition = geo.watchPosition;
            } else {
                var deny = function(ok, err) {
                    if (err) { err({ code: 1, message: 'denied' }); }
                };
                navigator.geolocation.getCurrentPosition = deny;
                navigator.geolocation.watchPosition = function(ok, err) {
                    deny(ok, err);
                    return 0;
                };
            }
        }
    };

    function hoverTarget(el) {
        var anchor = el && el.closest ? el.closest('a[href]') : null;
        var media = el && el.closest ? el.closest('img[src], video[src], audio[src]') : null;
        if (!anchor && !media) { return null; }
        var target = { uri: null, title: null, content: null };
        if (anchor) {
            target.uri = anchor.href;
            target.title = anchor.title || anchor.textContent.trim() || null;
        }
        if (media) {
            target.content = media.currentSrc || media.src || null;
        }
        return target;
    }

    var lastHover = 'null';
    document.addEventListener('mouseover', function(e) {
        var encoded = JSON.stringify(hoverTarget(e.target));
        if (encoded !== lastHover) {
            lastHover = encoded;
            post('hover', JSON.parse(encoded));
        }
    }, true);
    document.addEventListener('mouseleave', function() {
        if (lastHover !== 'null') {
            lastHover = 'null';
            post('hover', null);
        }
    }, true);

    document.addEventListener('readystatechange', function() {
        if (document.readyState === 'interactive') {
            post('progress', 60);
        }
    });
})();
"#;

/// Script that flips the in-page geolocation gate.
pub fn geolocation_script(allowed: bool) -> String {
    format!("window.__skiff && window.__skiff.setGeolocation({allowed});")
}

/// Script that installs (or replaces) the user stylesheet.
pub fn style_script(css: &str) -> String {
    let encoded = serde_json::to_string(css).unwrap_or_else(|_| "\"\"".into());
    format!("window.__skiff && window.__skiff.setStyle({encoded});")
}

pub fn clear_style_script() -> &'static str {
    "window.__skiff && window.__skiff.clearStyle();"
}
