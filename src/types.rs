//! Basic type definitions for the chat relay
//!
//! Provides the `ClientId` newtype and the allocator that hands them out
//! at accept time.

use std::sync::atomic::{AtomicU64, Ordering};

/// Unique client identifier (newtype pattern)
///
/// Assigned once per accepted connection and never reused while the
/// process runs, so a reconnect from the same peer address always gets
/// a fresh identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(pub u64);

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic `ClientId` source
///
/// Shared by the accept loop only; ids start at 1.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Hand out the next unused id
    pub fn next_id(&self) -> ClientId {
        ClientId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic() {
        let ids = IdAllocator::new();
        let first = ids.next_id();
        let second = ids.next_id();
        assert_eq!(first, ClientId(1));
        assert!(second > first);
    }

    #[test]
    fn test_ids_unique_across_threads() {
        let ids = std::sync::Arc::new(IdAllocator::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = ids.clone();
                std::thread::spawn(move || (0..100).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<ClientId> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 400);
    }

    #[test]
    fn test_client_id_display() {
        assert_eq!(ClientId(7).to_string(), "#7");
    }
}
