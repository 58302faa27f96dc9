//! # Adapters Layer
//!
//! Concrete implementations of the outbound ports.
//!
//! - `ledger` - `InMemoryLedger`, `KvLedger`
//! - `kv` - `InMemoryKVStore`, `FileBackedKVStore`
//! - `serializer` - bincode stack encoding
//! - `cipher` - XChaCha20-Poly1305 element cipher
//! - `locks` - per-stack serialization point
//! - `time` - system clock

pub mod cipher;
pub mod kv;
pub mod ledger;
pub mod locks;
pub mod serializer;
pub mod time;

pub use cipher::XChaChaElementCipher;
pub use kv::{FileBackedKVStore, InMemoryKVStore};
pub use ledger::{InMemoryLedger, KvLedger};
pub use locks::StackLocks;
pub use serializer::BincodeStackSerializer;
pub use time::SystemTimeSource;
