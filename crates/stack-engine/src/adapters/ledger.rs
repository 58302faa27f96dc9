//! # Ledger Adapters
//!
//! Both adapters enforce the optimistic version check of
//! [`StackLedger::persist`] while holding their own write lock, so the check
//! and the write cannot interleave with another persist.

use super::serializer::BincodeStackSerializer;
use crate::domain::entities::{Stack, StackId, StackValue};
use crate::domain::errors::LedgerError;
use crate::ports::outbound::{KeyValueStore, StackLedger, StackSerializer};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Key prefix for stacks in a key-value store: `s:{id}` -> Stack.
const STACK_PREFIX: &[u8] = b"s:";

fn stack_key(id: &StackId) -> Vec<u8> {
    let mut key = STACK_PREFIX.to_vec();
    key.extend_from_slice(id.as_str().as_bytes());
    key
}

fn check_version(stored: &Stack, incoming: &Stack) -> Result<(), LedgerError> {
    if stored.version != incoming.version {
        tracing::warn!(
            "[stack] ⚠️ Rejected stale persist of {}: based on v{}, ledger at v{}",
            incoming.id,
            incoming.version,
            stored.version
        );
        return Err(LedgerError::Conflict {
            stack_id: incoming.id.clone(),
            expected: incoming.version,
            actual: stored.version,
        });
    }
    Ok(())
}

/// In-memory ledger.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    stacks: RwLock<HashMap<StackId, Stack>>,
    fail_next_persist: AtomicBool,
    fail_create_in: AtomicUsize,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `persist` fail with a storage error.
    pub fn fail_next_persist(&self) {
        self.fail_next_persist.store(true, Ordering::SeqCst);
    }

    /// Let `successes` more `create` calls through, then fail the next one
    /// with a storage error.
    pub fn fail_create_after(&self, successes: usize) {
        self.fail_create_in.store(successes + 1, Ordering::SeqCst);
    }

    /// Number of stacks held.
    pub fn len(&self) -> usize {
        self.stacks.read().len()
    }

    /// Whether the ledger holds no stacks.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StackLedger for InMemoryLedger {
    fn fetch(&self, id: &StackId) -> Result<Stack, LedgerError> {
        self.stacks
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(id.clone()))
    }

    fn persist(&self, stack: &Stack) -> Result<u64, LedgerError> {
        if self.fail_next_persist.swap(false, Ordering::SeqCst) {
            return Err(LedgerError::Storage("injected persist failure".to_string()));
        }

        let mut stacks = self.stacks.write();
        let stored = stacks
            .get(&stack.id)
            .ok_or_else(|| LedgerError::NotFound(stack.id.clone()))?;
        check_version(stored, stack)?;

        let mut next = stack.clone();
        next.version += 1;
        let version = next.version;
        stacks.insert(next.id.clone(), next);
        Ok(version)
    }

    fn create(&self, values: Vec<StackValue>) -> Result<StackId, LedgerError> {
        let due = self
            .fail_create_in
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok_and(|n| n == 1);
        if due {
            return Err(LedgerError::Storage("injected create failure".to_string()));
        }

        let mut stacks = self.stacks.write();
        let mut id = StackId::generate();
        while stacks.contains_key(&id) {
            id = StackId::generate();
        }
        stacks.insert(id.clone(), Stack::new(id.clone(), values));
        Ok(id)
    }
}

/// Ledger over any [`KeyValueStore`].
pub struct KvLedger<KV, S = BincodeStackSerializer>
where
    KV: KeyValueStore,
    S: StackSerializer,
{
    store: Mutex<KV>,
    serializer: S,
}

impl<KV: KeyValueStore> KvLedger<KV, BincodeStackSerializer> {
    /// Ledger using bincode encoding.
    pub fn new(store: KV) -> Self {
        Self::with_serializer(store, BincodeStackSerializer)
    }
}

impl<KV, S> KvLedger<KV, S>
where
    KV: KeyValueStore,
    S: StackSerializer,
{
    /// Ledger using a custom serializer.
    pub fn with_serializer(store: KV, serializer: S) -> Self {
        Self {
            store: Mutex::new(store),
            serializer,
        }
    }

    /// Give back the underlying store.
    pub fn into_inner(self) -> KV {
        self.store.into_inner()
    }

    fn load(&self, store: &KV, id: &StackId) -> Result<Stack, LedgerError> {
        let bytes = store
            .get(&stack_key(id))?
            .ok_or_else(|| LedgerError::NotFound(id.clone()))?;
        self.serializer.deserialize(&bytes)
    }
}

impl<KV, S> StackLedger for KvLedger<KV, S>
where
    KV: KeyValueStore,
    S: StackSerializer,
{
    fn fetch(&self, id: &StackId) -> Result<Stack, LedgerError> {
        let store = self.store.lock();
        self.load(&store, id)
    }

    fn persist(&self, stack: &Stack) -> Result<u64, LedgerError> {
        let mut store = self.store.lock();
        let stored = self.load(&store, &stack.id)?;
        check_version(&stored, stack)?;

        let mut next = stack.clone();
        next.version += 1;
        let bytes = self.serializer.serialize(&next)?;
        store.put(&stack_key(&next.id), &bytes)?;
        Ok(next.version)
    }

    fn create(&self, values: Vec<StackValue>) -> Result<StackId, LedgerError> {
        let mut store = self.store.lock();
        let mut id = StackId::generate();
        while store.exists(&stack_key(&id))? {
            id = StackId::generate();
        }
        let bytes = self.serializer.serialize(&Stack::new(id.clone(), values))?;
        store.put(&stack_key(&id), &bytes)?;
        Ok(id)
    }
}
