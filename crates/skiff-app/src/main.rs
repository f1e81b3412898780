mod app;
mod cli;
mod exec;

use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use skiff_common::ShellEvent;
use skiff_config::paths;
use skiff_platform::{ActionTable, ChildReaper, PropertyChannel};

fn main() {
    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("skiff=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "skiff=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("skiff v{} starting", env!("CARGO_PKG_VERSION"));

    let mut settings = match &args.config {
        Some(path) => skiff_config::load_from_path(std::path::Path::new(path)),
        None => skiff_config::load_default(),
    }
    .unwrap_or_else(|e| {
        tracing::warn!("config load failed, using defaults: {e}");
        skiff_config::Settings::default()
    });
    args.apply(&mut settings);

    if let Err(e) = paths::prepare(&settings.cookie_file) {
        tracing::warn!("cannot prepare cookie jar: {e}");
    }

    // fatal setup: without a reaper helpers would pile up as zombies
    let _reaper = match ChildReaper::install() {
        Ok(reaper) => reaper,
        Err(e) => {
            tracing::error!("cannot install child reaper: {e}");
            std::process::exit(1);
        }
    };

    let channel = match PropertyChannel::create(paths::runtime_dir()) {
        Ok(channel) => channel,
        Err(e) => {
            tracing::error!("cannot open control channel: {e}");
            std::process::exit(1);
        }
    };

    let event_loop = EventLoop::<ShellEvent>::with_user_event()
        .build()
        .expect("failed to create event loop");
    let proxy = event_loop.create_proxy();

    let watcher_proxy = event_loop.create_proxy();
    let _watcher = match skiff_platform::watch(channel.clone(), move |client, slot| {
        let _ = watcher_proxy.send_event(ShellEvent::Channel { client, slot });
    }) {
        Ok(watcher) => watcher,
        Err(e) => {
            tracing::error!("cannot watch control channel: {e}");
            std::process::exit(1);
        }
    };

    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "skiff".to_string());
    let table = ActionTable::defaults();
    tracing::info!("action table loaded ({} bindings)", table.len());

    let mut shell = app::ShellApp::new(settings, table, channel, proxy, program);
    if let Err(e) = event_loop.run_app(&mut shell) {
        tracing::error!("event loop error: {e}");
    }
    tracing::info!("shutdown complete");
}
