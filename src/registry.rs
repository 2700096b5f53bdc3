//! Client registry
//!
//! The live mapping of `ClientId` to `RegisteredClient`. It is owned by the
//! broadcast loop and never shared, so it needs no locking.

use std::collections::HashMap;

use crate::client::RegisteredClient;
use crate::error::RegistryError;
use crate::types::ClientId;

/// Registered clients keyed by identity
#[derive(Debug, Default)]
pub struct Registry {
    clients: HashMap<ClientId, RegisteredClient>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client
    ///
    /// If the id is already present the stale entry is replaced and
    /// `DuplicateIdentity` is returned so the caller can report it.
    pub fn insert(&mut self, client: RegisteredClient) -> Result<(), RegistryError> {
        let id = client.id;
        match self.clients.insert(id, client) {
            Some(_) => Err(RegistryError::DuplicateIdentity(id)),
            None => Ok(()),
        }
    }

    /// Unregister a client, returning its entry if it was present
    pub fn remove(&mut self, id: ClientId) -> Option<RegisteredClient> {
        self.clients.remove(&id)
    }

    pub fn get(&self, id: ClientId) -> Option<&RegisteredClient> {
        self.clients.get(&id)
    }

    pub fn contains(&self, id: ClientId) -> bool {
        self.clients.contains_key(&id)
    }

    /// Current entries, in no particular order
    pub fn snapshot(&self) -> impl Iterator<Item = &RegisteredClient> {
        self.clients.values()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn client(id: u64, name: &str) -> (RegisteredClient, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(8);
        (RegisteredClient::new(ClientId(id), name.to_string(), tx), rx)
    }

    #[test]
    fn test_insert_and_get() {
        let mut registry = Registry::new();
        let (alice, _rx) = client(1, "alice");

        assert!(registry.insert(alice).is_ok());
        assert!(registry.contains(ClientId(1)));
        assert_eq!(registry.get(ClientId(1)).unwrap().name, "alice");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_overwrites() {
        let mut registry = Registry::new();
        let (old, _old_rx) = client(1, "old");
        let (new, _new_rx) = client(1, "new");

        registry.insert(old).unwrap();
        assert_eq!(
            registry.insert(new),
            Err(RegistryError::DuplicateIdentity(ClientId(1)))
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(ClientId(1)).unwrap().name, "new");
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut registry = Registry::new();
        let (alice, _rx) = client(1, "alice");
        registry.insert(alice).unwrap();

        assert!(registry.remove(ClientId(2)).is_none());
        assert!(registry.remove(ClientId(1)).is_some());
        assert!(registry.remove(ClientId(1)).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_snapshot() {
        let mut registry = Registry::new();
        let (a, _ra) = client(1, "a");
        let (b, _rb) = client(2, "b");
        registry.insert(a).unwrap();
        registry.insert(b).unwrap();

        let mut ids: Vec<ClientId> = registry.snapshot().map(|c| c.id).collect();
        ids.sort();
        assert_eq!(ids, vec![ClientId(1), ClientId(2)]);
    }
}
