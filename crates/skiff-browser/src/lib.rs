//! Per-window browsing state and the engine seam.
//!
//! A `Client` pairs one window's page state with a rendering engine
//! behind the [`WebEngine`] trait, so everything above the engine is
//! plain testable state machinery. The `wry`-backed engine lives in
//! [`wry_engine`]; the registry tracks all live clients and decides
//! when the process shuts down.

pub mod client;
pub mod engine;
pub mod ipc;
pub mod registry;
pub mod state;
pub mod title;
pub mod wry_engine;

pub use client::Client;
pub use engine::WebEngine;
pub use registry::ClientRegistry;
pub use state::PageState;
pub use title::compose;
pub use wry_engine::WryEngine;
