//! The property channel: per-window named control slots.
//!
//! Each client owns a control directory under the runtime dir holding
//! one file per [`Slot`]. Any process in the session can write a slot
//! (`printf %s "term" > .../<id>/find`); this process observes external
//! writes through a filesystem watcher and handles them on the UI event
//! loop. Slots are overwrite-on-write cells with at-most-one-pending
//! delivery: a second write before the first is handled replaces it,
//! it is never queued behind it. Concurrent writers race; last write
//! wins.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use skiff_common::{ClientId, PlatformError, Slot};
use tracing::{debug, error};

/// Filesystem-backed slot store for every client in this process.
pub struct PropertyChannel {
    root: PathBuf,
    /// Command slots with a delivered-but-unhandled notification.
    /// Membership here coalesces rapid writes into one delivery.
    pending: Mutex<HashSet<(ClientId, Slot)>>,
}

impl PropertyChannel {
    /// Open the channel root, creating it if needed. A root that cannot
    /// be created is a fatal setup error; there is no degraded mode.
    pub fn create(root: PathBuf) -> Result<Arc<Self>, PlatformError> {
        std::fs::create_dir_all(&root).map_err(|e| {
            PlatformError::Channel(format!("cannot create {}: {e}", root.display()))
        })?;
        Ok(Arc::new(Self {
            root,
            pending: Mutex::new(HashSet::new()),
        }))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the control directory for a new client.
    pub fn register(&self, id: &ClientId) -> Result<(), PlatformError> {
        let dir = self.client_dir(id);
        std::fs::create_dir_all(&dir)
            .map_err(|e| PlatformError::Channel(format!("cannot create {}: {e}", dir.display())))
    }

    /// Remove a closed client's control directory. Best effort.
    pub fn unregister(&self, id: &ClientId) {
        let dir = self.client_dir(id);
        if let Err(e) = std::fs::remove_dir_all(&dir) {
            debug!("could not remove {}: {e}", dir.display());
        }
        let mut pending = self.pending.lock().unwrap();
        pending.retain(|(pending_id, _)| pending_id != id);
    }

    pub fn client_dir(&self, id: &ClientId) -> PathBuf {
        self.root.join(id.as_str())
    }

    pub fn slot_path(&self, id: &ClientId, slot: Slot) -> PathBuf {
        self.client_dir(id).join(slot.as_str())
    }

    /// Replace the slot value.
    pub fn set(&self, id: &ClientId, slot: Slot, value: &str) -> Result<(), PlatformError> {
        let path = self.slot_path(id, slot);
        std::fs::write(&path, value)
            .map_err(|e| PlatformError::Channel(format!("cannot write {}: {e}", path.display())))
    }

    /// Current slot value; an absent slot reads as empty, not an error.
    pub fn get(&self, id: &ClientId, slot: Slot) -> String {
        std::fs::read_to_string(self.slot_path(id, slot)).unwrap_or_default()
    }

    /// Record a filesystem change and decide whether to deliver a
    /// notification. Returns the changed command slot only on the first
    /// unhandled write; further writes before [`take`](Self::take)
    /// coalesce into that one delivery. The URI slot is written by this
    /// process for external readback and is never delivered.
    pub fn observe(&self, path: &Path) -> Option<(ClientId, Slot)> {
        let slot = Slot::from_file_name(path.file_name()?.to_str()?)?;
        if slot == Slot::Uri {
            return None;
        }
        let dir = path.parent()?;
        if dir.parent() != Some(self.root.as_path()) {
            return None;
        }
        let id = ClientId::from_raw(dir.file_name()?.to_str()?);

        let mut pending = self.pending.lock().unwrap();
        if pending.insert((id.clone(), slot)) {
            Some((id, slot))
        } else {
            None
        }
    }

    /// Consume a delivered notification: clear the pending mark and
    /// read the value current *now* (not the value at write time).
    pub fn take(&self, id: &ClientId, slot: Slot) -> String {
        self.pending.lock().unwrap().remove(&(id.clone(), slot));
        self.get(id, slot)
    }
}

/// Keeps the filesystem watcher alive for the life of the process.
pub struct ChannelWatcher {
    _watcher: RecommendedWatcher,
}

/// Watch the channel root and invoke `deliver` for each coalesced
/// external write to a command slot. `deliver` runs on the watcher
/// thread and must only forward the event into the UI loop.
pub fn watch(
    channel: Arc<PropertyChannel>,
    deliver: impl Fn(ClientId, Slot) + Send + 'static,
) -> Result<ChannelWatcher, PlatformError> {
    let root = channel.root().to_path_buf();

    let mut watcher = RecommendedWatcher::new(
        move |result: Result<Event, notify::Error>| match result {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    return;
                }
                for path in &event.paths {
                    if let Some((id, slot)) = channel.observe(path) {
                        debug!("slot {} written for client {id}", slot.wire_name());
                        deliver(id, slot);
                    }
                }
            }
            Err(e) => {
                error!("channel watcher error: {e}");
            }
        },
        notify::Config::default(),
    )
    .map_err(|e| PlatformError::Channel(format!("failed to create watcher: {e}")))?;

    watcher
        .watch(&root, RecursiveMode::Recursive)
        .map_err(|e| PlatformError::Channel(format!("failed to watch {}: {e}", root.display())))?;

    Ok(ChannelWatcher { _watcher: watcher })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> (tempfile::TempDir, Arc<PropertyChannel>) {
        let dir = tempfile::tempdir().unwrap();
        let channel = PropertyChannel::create(dir.path().join("skiff")).unwrap();
        (dir, channel)
    }

    #[test]
    fn absent_slot_reads_empty() {
        let (_dir, channel) = channel();
        let id = ClientId::new();
        channel.register(&id).unwrap();
        assert_eq!(channel.get(&id, Slot::Find), "");
    }

    #[test]
    fn set_then_get_roundtrips() {
        let (_dir, channel) = channel();
        let id = ClientId::new();
        channel.register(&id).unwrap();

        channel.set(&id, Slot::Uri, "about:blank").unwrap();
        assert_eq!(channel.get(&id, Slot::Uri), "about:blank");

        channel.set(&id, Slot::Uri, "http://example.com").unwrap();
        assert_eq!(channel.get(&id, Slot::Uri), "http://example.com");
    }

    #[test]
    fn observe_delivers_once_until_taken() {
        let (_dir, channel) = channel();
        let id = ClientId::new();
        channel.register(&id).unwrap();

        let path = channel.slot_path(&id, Slot::Go);
        channel.set(&id, Slot::Go, "first").unwrap();
        assert_eq!(channel.observe(&path), Some((id.clone(), Slot::Go)));

        // second write before the first is handled coalesces
        channel.set(&id, Slot::Go, "second").unwrap();
        assert_eq!(channel.observe(&path), None);

        // the single delivery sees the second value only
        assert_eq!(channel.take(&id, Slot::Go), "second");

        // after take, the next write delivers again
        channel.set(&id, Slot::Go, "third").unwrap();
        assert_eq!(channel.observe(&path), Some((id.clone(), Slot::Go)));
    }

    #[test]
    fn uri_slot_is_never_delivered() {
        let (_dir, channel) = channel();
        let id = ClientId::new();
        channel.register(&id).unwrap();

        channel.set(&id, Slot::Uri, "http://example.com").unwrap();
        let path = channel.slot_path(&id, Slot::Uri);
        assert_eq!(channel.observe(&path), None);
    }

    #[test]
    fn unrelated_paths_are_ignored() {
        let (_dir, channel) = channel();
        assert_eq!(channel.observe(Path::new("/etc/passwd")), None);
        assert_eq!(channel.observe(&channel.root().join("stray")), None);
    }

    #[test]
    fn unregister_clears_pending_state() {
        let (_dir, channel) = channel();
        let id = ClientId::new();
        channel.register(&id).unwrap();

        channel.set(&id, Slot::Find, "needle").unwrap();
        let path = channel.slot_path(&id, Slot::Find);
        assert!(channel.observe(&path).is_some());

        channel.unregister(&id);
        assert!(!channel.client_dir(&id).exists());

        // a re-registered client starts with a clean pending set
        channel.register(&id).unwrap();
        channel.set(&id, Slot::Find, "needle").unwrap();
        assert!(channel.observe(&path).is_some());
    }

    #[test]
    fn watcher_forwards_external_writes() {
        use std::sync::mpsc;
        use std::time::Duration;

        let (_dir, channel) = channel();
        let id = ClientId::new();
        channel.register(&id).unwrap();

        let (tx, rx) = mpsc::channel();
        let _guard = watch(channel.clone(), move |id, slot| {
            let _ = tx.send((id, slot));
        })
        .unwrap();

        // simulate an external tool writing the GO slot
        std::fs::write(channel.slot_path(&id, Slot::Go), "example.org").unwrap();

        let (got_id, got_slot) = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("watcher delivered nothing");
        assert_eq!(got_id, id);
        assert_eq!(got_slot, Slot::Go);
        assert_eq!(channel.take(&id, Slot::Go), "example.org");
    }
}
