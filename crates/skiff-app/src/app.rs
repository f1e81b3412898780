//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the one
//! event loop everything funnels into: key presses, engine callbacks,
//! and external control-slot writes all end up here as events, mutate
//! client state, and recompose the window title.

use std::collections::HashMap;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoopProxy};
use winit::keyboard::Key;
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use skiff_browser::wry_engine::EventSink;
use skiff_browser::{compose, Client, ClientRegistry, WryEngine};
use skiff_common::{Action, ClientId, EngineEvent, Result, ShellEvent, Slot, WebSetting};
use skiff_config::{paths, Settings};
use skiff_platform::{ActionTable, KeyCombo, PropertyChannel};

use crate::exec;

/// Top-level application state.
pub struct ShellApp {
    settings: Settings,
    table: ActionTable,
    registry: ClientRegistry,
    channel: Arc<PropertyChannel>,
    proxy: EventLoopProxy<ShellEvent>,

    // Windowing
    windows: HashMap<WindowId, ClientId>,
    handles: HashMap<ClientId, Arc<Window>>,

    // Modifier tracking (winit sends these separately)
    modifiers: winit::keyboard::ModifiersState,

    /// argv[0], re-executed for every new window.
    program: String,
    proxy_env_set: bool,
    user_script: Option<String>,
}

impl ShellApp {
    pub fn new(
        settings: Settings,
        table: ActionTable,
        channel: Arc<PropertyChannel>,
        proxy: EventLoopProxy<ShellEvent>,
        program: String,
    ) -> Self {
        let user_script = std::fs::read_to_string(paths::expand(&settings.script_file)).ok();
        Self {
            settings,
            table,
            registry: ClientRegistry::new(),
            channel,
            proxy,
            windows: HashMap::new(),
            handles: HashMap::new(),
            modifiers: winit::keyboard::ModifiersState::empty(),
            program,
            proxy_env_set: std::env::var_os("http_proxy").is_some(),
            user_script,
        }
    }

    /// Create a window plus client. Failure here is a fatal setup
    /// error; nothing is left half-registered.
    fn create_client(&mut self, event_loop: &ActiveEventLoop, uri: Option<&str>) {
        let mut attrs = WindowAttributes::default()
            .with_title("skiff")
            .with_inner_size(winit::dpi::LogicalSize::new(1024.0, 768.0));
        if self.settings.run_fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                std::process::exit(1);
            }
        };

        let id = ClientId::new();
        if let Err(e) = self.channel.register(&id) {
            tracing::error!("failed to register client {id}: {e}");
            std::process::exit(1);
        }
        let _ = self.channel.set(&id, Slot::Find, "");
        let _ = self.channel.set(&id, Slot::Uri, uri.unwrap_or("about:blank"));

        let size = window.inner_size();
        let bounds = wry::Rect {
            position: wry::dpi::PhysicalPosition::new(0, 0).into(),
            size: wry::dpi::PhysicalSize::new(size.width, size.height).into(),
        };

        let sink: EventSink = {
            let proxy = self.proxy.clone();
            let client = id.clone();
            Arc::new(move |event| {
                let _ = proxy.send_event(ShellEvent::Engine {
                    client: client.clone(),
                    event,
                });
            })
        };

        let engine = match WryEngine::attach(
            window.as_ref(),
            bounds,
            uri.unwrap_or("about:blank"),
            &self.settings,
            self.user_script.as_deref(),
            sink,
        ) {
            Ok(engine) => engine,
            Err(e) => {
                tracing::error!("failed to attach engine: {e}");
                std::process::exit(1);
            }
        };

        let client = Client::new(id.clone(), Box::new(engine), &self.settings);
        if self.settings.show_window_id {
            println!("{id}");
        }
        tracing::info!("client {id} created");

        self.windows.insert(window.id(), id.clone());
        self.handles.insert(id.clone(), window);
        self.registry.insert(client);
        self.update_title(&id);
    }

    /// Tear down one client; exits the loop when it was the last.
    fn destroy_client(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId) {
        let Some(id) = self.windows.remove(&window_id) else {
            return;
        };
        self.handles.remove(&id);
        self.channel.unregister(&id);
        if self.registry.remove(&id) {
            tracing::info!("last client closed, shutting down");
            event_loop.exit();
        }
    }

    fn update_title(&self, id: &ClientId) {
        let (Some(client), Some(window)) = (self.registry.get(id), self.handles.get(id)) else {
            return;
        };
        window.set_title(&compose(
            &client.state,
            client.styled,
            &self.settings,
            self.proxy_env_set,
        ));
    }

    fn style_css(&self) -> String {
        std::fs::read_to_string(paths::expand(&self.settings.style_file)).unwrap_or_default()
    }

    fn spawn(&self, argv: &[String]) {
        if let Err(e) = skiff_platform::spawn(argv) {
            tracing::warn!("helper failed: {e}");
        }
    }

    fn prompt(&self, id: &ClientId, slot: Slot) {
        let current = self.channel.get(id, if slot == Slot::Go { Slot::Uri } else { slot });
        self.spawn(&exec::prompt_argv(&current, &self.channel.slot_path(id, slot)));
    }

    fn run_action(&mut self, id: &ClientId, action: &Action) -> Result<()> {
        tracing::debug!("client {id}: {}", action.label());
        match action {
            Action::Reload { bypass_cache } => {
                self.with_client(id, |c| c.reload(*bypass_cache))?;
            }
            Action::Stop => self.with_client(id, |c| c.stop())?,
            Action::Navigate(steps) => self.with_client(id, |c| c.navigate(*steps))?,
            Action::Zoom(direction) => self.with_client(id, |c| c.zoom(*direction))?,
            Action::ScrollVertical(step) => {
                self.with_client(id, |c| c.scroll_vertical(*step))?;
            }
            Action::ScrollHorizontal(step) => {
                self.with_client(id, |c| c.scroll_horizontal(*step))?;
            }
            Action::ToggleFullscreen => {
                if let Some(window) = self.handles.get(id) {
                    let next = match window.fullscreen() {
                        Some(_) => None,
                        None => Some(Fullscreen::Borderless(None)),
                    };
                    window.set_fullscreen(next);
                }
            }
            Action::ToggleInspector => self.with_client(id, |c| c.toggle_inspector())?,
            Action::Print => self.with_client(id, |c| c.print())?,
            Action::PromptGo => self.prompt(id, Slot::Go),
            Action::PromptFind => self.prompt(id, Slot::Find),
            Action::Find { forward } => {
                let text = self.channel.get(id, Slot::Find);
                self.with_client(id, |c| c.find(&text, *forward))?;
            }
            Action::Clipboard { paste } => self.clipboard(id, *paste)?,
            Action::Toggle(setting) => {
                let enabled = self.toggle_setting(*setting);
                self.with_client(id, |c| {
                    c.apply_setting(*setting, enabled)?;
                    c.reload(false)
                })?;
            }
            Action::ToggleCookiePolicy => {
                let policy = self.settings.rotate_cookie_policy();
                tracing::info!("cookie policy now {policy:?}");
            }
            Action::ToggleGeolocation => {
                self.settings.allow_geolocation = !self.settings.allow_geolocation;
                let allowed = self.settings.allow_geolocation;
                self.with_client(id, |c| {
                    c.engine()
                        .eval(&skiff_browser::ipc::geolocation_script(allowed))
                })?;
            }
            Action::ToggleStyle => {
                let css = self.style_css();
                self.with_client(id, |c| c.toggle_style(&css))?;
            }
            Action::NewWindow => {
                let uri = self
                    .registry
                    .get(id)
                    .and_then(|c| c.state.hover.uri.clone());
                self.spawn(&exec::new_window_argv(
                    &self.program,
                    &self.settings,
                    uri.as_deref(),
                ));
            }
        }
        self.update_title(id);
        Ok(())
    }

    fn with_client<F>(&mut self, id: &ClientId, f: F) -> Result<()>
    where
        F: FnOnce(&mut Client) -> Result<()>,
    {
        match self.registry.get_mut(id) {
            Some(client) => f(client),
            None => Ok(()),
        }
    }

    /// Flip one engine setting in the shared settings object.
    fn toggle_setting(&mut self, setting: WebSetting) -> bool {
        let slot = match setting {
            WebSetting::CaretBrowsing => &mut self.settings.caret_browsing,
            WebSetting::LoadImages => &mut self.settings.load_images,
            WebSetting::Javascript => &mut self.settings.enable_javascript,
            WebSetting::Plugins => &mut self.settings.enable_plugins,
        };
        *slot = !*slot;
        *slot
    }

    fn clipboard(&mut self, id: &ClientId, paste: bool) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| skiff_common::PlatformError::Clipboard(e.to_string()))?;
        if paste {
            let target = clipboard.get_text().unwrap_or_default();
            let mut committed = None;
            self.with_client(id, |c| {
                committed = c.load_uri(&target)?;
                Ok(())
            })?;
            if let Some(uri) = committed {
                let _ = self.channel.set(id, Slot::Uri, &uri);
            }
        } else if let Some(client) = self.registry.get(id) {
            let uri = client.state.link_or_uri().to_string();
            clipboard
                .set_text(uri)
                .map_err(|e| skiff_common::PlatformError::Clipboard(e.to_string()))?;
        }
        Ok(())
    }

    fn handle_engine_event(&mut self, id: &ClientId, event: EngineEvent) {
        match &event {
            EngineEvent::LoadCommitted { uri, .. } => {
                if let Err(e) = self.channel.set(id, Slot::Uri, uri) {
                    tracing::warn!("failed to publish uri: {e}");
                }
            }
            EngineEvent::OpenWindow { uri } => {
                self.spawn(&exec::new_window_argv(
                    &self.program,
                    &self.settings,
                    Some(uri),
                ));
                return;
            }
            EngineEvent::DownloadRequested { uri } => {
                let referer = self
                    .registry
                    .get(id)
                    .map(|c| c.state.uri.clone())
                    .unwrap_or_default();
                self.spawn(&exec::download_argv(&self.settings, uri, &referer));
                return;
            }
            EngineEvent::PermissionRequested { kind } => {
                tracing::debug!("permission request {kind:?} while geolocation allowed={}",
                    self.settings.allow_geolocation);
                return;
            }
            _ => {}
        }

        if let Some(client) = self.registry.get_mut(id) {
            client.state.apply(&event);
            self.update_title(id);
        }
    }

    fn handle_slot_write(&mut self, id: &ClientId, slot: Slot) {
        let value = self.channel.take(id, slot);
        let result = match slot {
            Slot::Find => self.with_client(id, |c| c.find(&value, true)),
            Slot::Go => {
                let mut committed = None;
                let result = self.with_client(id, |c| {
                    committed = c.load_uri(&value)?;
                    Ok(())
                });
                if let Some(uri) = committed {
                    let _ = self.channel.set(id, Slot::Uri, &uri);
                }
                result
            }
            // written by this process only, never dispatched
            Slot::Uri => Ok(()),
        };
        if let Err(e) = result {
            tracing::warn!("slot {} handling failed: {e}", slot.wire_name());
        }
        self.update_title(id);
    }
}

impl ApplicationHandler<ShellEvent> for ShellApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !self.windows.is_empty() {
            return;
        }
        let uri = self.settings.start_uri.clone();
        self.create_client(event_loop, uri.as_deref());
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.destroy_client(event_loop, window_id);
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(id) = self.windows.get(&window_id).cloned() {
                        let result = self.with_client(&id, |c| {
                            c.engine().set_bounds(size.width, size.height)
                        });
                        if let Err(e) = result {
                            tracing::warn!("resize failed: {e}");
                        }
                    }
                }
            }

            WindowEvent::ModifiersChanged(new_modifiers) => {
                self.modifiers = new_modifiers.state();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let KeyEvent {
                    logical_key, state, ..
                } = event;
                if state != ElementState::Pressed || self.settings.kiosk_mode {
                    return;
                }
                let Some(id) = self.windows.get(&window_id).cloned() else {
                    return;
                };

                let key_name = match &logical_key {
                    Key::Named(named) => format!("{named:?}"),
                    Key::Character(c) => c.to_string(),
                    _ => return,
                };

                let combo = KeyCombo::from_parts(
                    self.modifiers.control_key(),
                    self.modifiers.alt_key(),
                    self.modifiers.shift_key(),
                    self.modifiers.super_key(),
                    &key_name,
                );
                let actions: Vec<Action> = self
                    .table
                    .dispatch(combo.mods, &combo.key)
                    .into_iter()
                    .cloned()
                    .collect();
                for action in &actions {
                    if let Err(e) = self.run_action(&id, action) {
                        tracing::warn!("{} failed: {e}", action.label());
                    }
                }
            }

            _ => {}
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: ShellEvent) {
        match event {
            ShellEvent::Engine { client, event } => self.handle_engine_event(&client, event),
            ShellEvent::Channel { client, slot } => self.handle_slot_write(&client, slot),
        }
    }
}
