//! # Per-Stack Locks
//!
//! Serialization point for fetch → transform → persist units. Two calls on the
//! same stack id run one after the other; calls on different ids do not block
//! each other.

use crate::domain::entities::StackId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of one mutex per stack id.
#[derive(Debug, Default)]
pub struct StackLocks {
    locks: Mutex<HashMap<StackId, Arc<Mutex<()>>>>,
}

impl StackLocks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The mutex guarding `id`, created on first use.
    ///
    /// Lock the returned handle for the duration of the unit:
    ///
    /// ```ignore
    /// let handle = locks.handle(&id);
    /// let _guard = handle.lock();
    /// ```
    pub fn handle(&self, id: &StackId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        Arc::clone(locks.entry(id.clone()).or_default())
    }

    /// Give back a handle from [`StackLocks::handle`]. The entry is removed
    /// once no other caller holds or waits on it.
    pub fn release(&self, id: &StackId, handle: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock();
        drop(handle);
        if locks.get(id).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(id);
        }
    }

    /// Drop registry entries nobody is holding.
    pub fn prune(&self) -> usize {
        let mut locks = self.locks.lock();
        let before = locks.len();
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        before - locks.len()
    }

    /// Number of ids with a registered lock.
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    /// Whether no lock is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_same_id_same_mutex() {
        let locks = StackLocks::new();
        let a = locks.handle(&StackId::from("a"));
        let again = locks.handle(&StackId::from("a"));
        let b = locks.handle(&StackId::from("b"));
        assert!(Arc::ptr_eq(&a, &again));
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(locks.len(), 2);
    }

    #[test]
    fn test_prune_keeps_held_locks() {
        let locks = StackLocks::new();
        let held = locks.handle(&StackId::from("held"));
        drop(locks.handle(&StackId::from("idle")));

        assert_eq!(locks.prune(), 1);
        assert_eq!(locks.len(), 1);
        drop(held);
        assert_eq!(locks.prune(), 1);
        assert!(locks.is_empty());
    }

    #[test]
    fn test_release_removes_idle_entry() {
        let locks = StackLocks::new();
        let id = StackId::from("a");
        let first = locks.handle(&id);
        let second = locks.handle(&id);

        locks.release(&id, first);
        assert_eq!(locks.len(), 1);
        locks.release(&id, second);
        assert!(locks.is_empty());
    }

    #[test]
    fn test_mutual_exclusion() {
        let locks = Arc::new(StackLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let locks = Arc::clone(&locks);
                let inside = Arc::clone(&inside);
                let max_seen = Arc::clone(&max_seen);
                thread::spawn(move || {
                    for _ in 0..50 {
                        let handle = locks.handle(&StackId::from("shared"));
                        let _guard = handle.lock();
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        max_seen.fetch_max(now, Ordering::SeqCst);
                        inside.fetch_sub(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }
}
