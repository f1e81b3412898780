//! `wry`-backed implementation of [`WebEngine`].
//!
//! Engine callbacks never touch shell state directly; each handler
//! forwards a typed [`EngineEvent`] through the sink, and the shell
//! folds it into client state on its own loop. Operations the webview
//! has no native call for (stop, history, search, styles) go through
//! `evaluate_script`.

use std::sync::Arc;

use tracing::debug;
use wry::raw_window_handle::HasWindowHandle;
use wry::{WebView, WebViewBuilder};

use skiff_common::{EngineEvent, Result, ShellError, WebSetting};
use skiff_config::Settings;

use crate::engine::WebEngine;
use crate::ipc::{self, BridgeMessage, INIT_SCRIPT};

/// Shared sink the engine pushes events into, from whatever thread the
/// webview calls back on.
pub type EventSink = Arc<dyn Fn(EngineEvent) + Send + Sync>;

pub struct WryEngine {
    webview: WebView,
}

impl WryEngine {
    /// Build a webview filling `window` and start loading `uri`.
    ///
    /// `user_script` is an extra script injected into every page, from
    /// the configured script file.
    pub fn attach<W: HasWindowHandle>(
        window: &W,
        bounds: wry::Rect,
        uri: &str,
        settings: &Settings,
        user_script: Option<&str>,
        sink: EventSink,
    ) -> Result<Self> {
        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_devtools(settings.enable_inspector)
            .with_initialization_script(INIT_SCRIPT)
            .with_user_agent(&settings.user_agent_for_new_client());

        if let Some(script) = user_script {
            builder = builder.with_initialization_script(script);
        }

        let ipc_sink = Arc::clone(&sink);
        builder = builder.with_ipc_handler(move |request| {
            if let Some(event) =
                BridgeMessage::from_json(request.body()).and_then(BridgeMessage::into_event)
            {
                ipc_sink(event);
            }
        });

        let load_sink = Arc::clone(&sink);
        builder = builder.with_on_page_load_handler(move |event, url| match event {
            wry::PageLoadEvent::Started => {
                load_sink(EngineEvent::LoadStarted);
                load_sink(EngineEvent::LoadCommitted {
                    secure: url.starts_with("https://"),
                    secure_failed: false,
                    uri: url,
                });
            }
            wry::PageLoadEvent::Finished => {
                load_sink(EngineEvent::LoadFinished);
            }
        });

        let title_sink = Arc::clone(&sink);
        builder = builder.with_document_title_changed_handler(move |title| {
            title_sink(EngineEvent::TitleChanged(title));
        });

        builder = builder.with_navigation_handler(|url| {
            debug!("navigating to {url}");
            true
        });

        // top-level window requests become new processes, never
        // in-process windows
        let window_sink = Arc::clone(&sink);
        builder = builder.with_new_window_req_handler(move |uri| {
            window_sink(EngineEvent::OpenWindow { uri });
            false
        });

        // downloads are handed to an external fetcher
        let download_sink = Arc::clone(&sink);
        builder = builder.with_download_started_handler(move |uri, _path| {
            download_sink(EngineEvent::DownloadRequested { uri });
            false
        });

        builder = builder.with_url(uri);

        let webview = builder
            .build_as_child(window)
            .map_err(|e| ShellError::Engine(e.to_string()))?;

        let engine = Self { webview };
        if settings.zoom_level != 1.0 {
            engine.set_zoom(settings.zoom_level)?;
        }
        if !settings.allow_geolocation {
            engine.eval(&ipc::geolocation_script(false))?;
        }
        Ok(engine)
    }

    fn map_err(e: wry::Error) -> ShellError {
        ShellError::Engine(e.to_string())
    }
}

impl WebEngine for WryEngine {
    fn load_uri(&self, uri: &str) -> Result<()> {
        self.webview.load_url(uri).map_err(Self::map_err)
    }

    fn reload(&self, bypass_cache: bool) -> Result<()> {
        if bypass_cache {
            // engines ignore location.reload's force flag; refetch the
            // document with the HTTP cache bypassed, then reload from
            // the now-fresh cache entry
            self.eval("fetch(location.href, { cache: 'reload' }).finally(() => location.reload())")
        } else {
            self.eval("location.reload()")
        }
    }

    fn stop(&self) -> Result<()> {
        self.eval("window.stop()")
    }

    fn history(&self, steps: i32) -> Result<()> {
        self.eval(&format!("history.go({steps})"))
    }

    fn set_zoom(&self, level: f64) -> Result<()> {
        self.webview.zoom(level).map_err(Self::map_err)
    }

    fn search(&self, text: &str, forward: bool) -> Result<()> {
        let encoded =
            serde_json::to_string(text).map_err(|e| ShellError::Engine(e.to_string()))?;
        self.eval(&format!(
            "window.find({encoded}, false, {}, true)",
            !forward
        ))
    }

    fn eval(&self, js: &str) -> Result<()> {
        self.webview.evaluate_script(js).map_err(Self::map_err)
    }

    fn inject_style(&self, css: &str) -> Result<()> {
        self.eval(&ipc::style_script(css))
    }

    fn clear_style(&self) -> Result<()> {
        self.eval(ipc::clear_style_script())
    }

    fn apply_setting(&self, setting: WebSetting, enabled: bool) -> Result<()> {
        // engine settings are fixed per webview; toggles take effect
        // for windows created from now on
        debug!("{setting:?} set to {enabled}, applies to new windows");
        Ok(())
    }

    fn show_inspector(&self, show: bool) -> Result<()> {
        if show {
            self.webview.open_devtools();
        } else {
            self.webview.close_devtools();
        }
        Ok(())
    }

    fn print(&self) -> Result<()> {
        self.eval("window.print()")
    }

    fn focus(&self) -> Result<()> {
        self.webview.focus().map_err(Self::map_err)
    }

    fn set_bounds(&self, width: u32, height: u32) -> Result<()> {
        self.webview
            .set_bounds(wry::Rect {
                position: wry::dpi::PhysicalPosition::new(0, 0).into(),
                size: wry::dpi::PhysicalSize::new(width, height).into(),
            })
            .map_err(Self::map_err)
    }
}
