//! # Outbound Ports (Driven Ports)
//!
//! Collaborators the engine consumes. The engine owns none of their
//! guarantees: durability belongs to the ledger, the algorithm to the cipher.

use crate::domain::entities::{Checksum, Stack, StackId, StackValue, Timestamp};
use crate::domain::errors::{CipherError, LedgerError};
use std::sync::Arc;

/// Durable, versioned storage of whole stacks.
///
/// ## Versioning
///
/// `fetch` returns the stack with its current `version`. `persist` treats the
/// supplied stack's `version` as the base it was derived from: if the ledger
/// has moved on, the write is rejected with `LedgerError::Conflict` and
/// nothing changes. On success the ledger stores `version + 1` and returns it.
pub trait StackLedger: Send + Sync {
    /// Read the current copy of a stack.
    fn fetch(&self, id: &StackId) -> Result<Stack, LedgerError>;

    /// Replace the stored stack wholesale.
    fn persist(&self, stack: &Stack) -> Result<u64, LedgerError>;

    /// Store a new stack initialised with `values` and return its id.
    fn create(&self, values: Vec<StackValue>) -> Result<StackId, LedgerError>;
}

/// Several engines may share one ledger; the version check keeps their
/// writes from overwriting each other.
impl<L: StackLedger + ?Sized> StackLedger for Arc<L> {
    fn fetch(&self, id: &StackId) -> Result<Stack, LedgerError> {
        (**self).fetch(id)
    }

    fn persist(&self, stack: &Stack) -> Result<u64, LedgerError> {
        (**self).persist(stack)
    }

    fn create(&self, values: Vec<StackValue>) -> Result<StackId, LedgerError> {
        (**self).create(values)
    }
}

/// Encryption boundary for element payloads and log details.
pub trait ElementCipher: Send + Sync {
    /// Encrypt plaintext.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError>;

    /// Decrypt ciphertext produced by `encrypt`.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError>;

    /// Integrity digest of plaintext.
    fn checksum(&self, plaintext: &[u8]) -> Checksum;

    /// Verify plaintext against a stored digest.
    fn verify_checksum(&self, plaintext: &[u8], checksum: &Checksum) -> bool {
        self.checksum(plaintext) == *checksum
    }
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Get current timestamp in seconds since epoch.
    fn now(&self) -> Timestamp;
}

/// Abstract interface for key-value database operations.
///
/// Backs [`crate::KvLedger`]. Implementations must make `put` visible to the
/// next `get` on the same store.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), LedgerError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, LedgerError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Abstract interface for stack encoding.
pub trait StackSerializer: Send + Sync {
    /// Serialize a stack to bytes.
    fn serialize(&self, stack: &Stack) -> Result<Vec<u8>, LedgerError>;

    /// Deserialize bytes to a stack.
    fn deserialize(&self, data: &[u8]) -> Result<Stack, LedgerError>;
}
