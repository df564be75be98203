//! Per content hash mutual exclusion.
//!
//! Two notifications carrying identical content must not both miss each
//! other's insert. Every capture holds the lock of its hash from lookup until
//! the insert or touch is done; distinct hashes never wait on each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use cv_core::ContentHash;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Slot = Arc<AsyncMutex<()>>;

/// Lazily populated map of async mutexes keyed by content hash.
///
/// A slot is removed as soon as no task holds or waits for it, so the map
/// only ever contains hashes that are in flight.
#[derive(Default)]
pub struct HashLocks {
    slots: Mutex<HashMap<ContentHash, Slot>>,
}

/// Held lock on one content hash. Released on drop.
pub struct HashLockGuard<'a> {
    // Declared first so the mutex is unlocked before the slot is reclaimed.
    _guard: OwnedMutexGuard<()>,
    _slot: SlotRef<'a>,
}

struct SlotRef<'a> {
    locks: &'a HashLocks,
    hash: ContentHash,
    slot: Slot,
}

impl Drop for SlotRef<'_> {
    fn drop(&mut self) {
        let mut slots = self
            .locks
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // One reference in the map, one here: nobody else holds or awaits it.
        if Arc::strong_count(&self.slot) == 2 {
            slots.remove(&self.hash);
        }
    }
}

impl HashLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other task holds `hash`, then hold it.
    pub async fn lock(&self, hash: &ContentHash) -> HashLockGuard<'_> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.entry(hash.clone()).or_default().clone()
        };
        let slot_ref = SlotRef {
            locks: self,
            hash: hash.clone(),
            slot,
        };

        let guard = slot_ref.slot.clone().lock_owned().await;

        HashLockGuard {
            _guard: guard,
            _slot: slot_ref,
        }
    }

    /// Number of hashes currently held or awaited.
    pub fn in_flight(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
