//! Tracks every live client in this process.
//!
//! The process exists to show windows; when the last client is
//! removed the registry reports that shutdown is due, exactly once,
//! no matter how creations and removals interleave.

use std::collections::HashMap;

use skiff_common::ClientId;
use tracing::debug;

use crate::client::Client;

#[derive(Default)]
pub struct ClientRegistry {
    clients: HashMap<ClientId, Client>,
    shutdown_sent: bool,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, client: Client) {
        debug!("client {} registered", client.id);
        self.clients.insert(client.id.clone(), client);
    }

    pub fn get(&self, id: &ClientId) -> Option<&Client> {
        self.clients.get(id)
    }

    pub fn get_mut(&mut self, id: &ClientId) -> Option<&mut Client> {
        self.clients.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ClientId> {
        self.clients.keys()
    }

    /// Remove a client. Returns true when this removal emptied the
    /// registry and shutdown has not been signalled before.
    pub fn remove(&mut self, id: &ClientId) -> bool {
        if self.clients.remove(id).is_none() {
            return false;
        }
        debug!("client {id} removed, {} remain", self.clients.len());
        if self.clients.is_empty() && !self.shutdown_sent {
            self.shutdown_sent = true;
            return true;
        }
        false
    }
}
