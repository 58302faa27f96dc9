//! # Stack Engine
//!
//! Ledger-backed ordered collections whose elements are encrypted at rest and
//! checksummed on their plaintext.
//!
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Control Flow
//!
//! ```text
//! caller ──→ StackEngine ──fetch──→ StackLedger
//!                │                      ↑
//!                ├──decrypt/encrypt──→ ElementCipher
//!                │                      │
//!                └──────persist─────────┘
//! ```
//!
//! Every mutating operation is one fetch → transform → persist unit, run under
//! a per-stack lock and guarded by an optimistic version check on persist.
//!
//! ## Domain Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Whole-sequence writes | `values` is only ever replaced as a whole |
//! | Encrypted at rest | Plaintext never reaches the ledger |
//! | Plaintext checksums | Checksums are computed over plaintext, not ciphertext |
//! | Strict bounds | Index operations reject out-of-range indices |
//! | No lost updates | Stale persists are rejected with `VersionConflict` |
//!
//! ## Crate Structure
//!
//! - `domain/` - Entities, configuration, errors, pure sequence algorithms
//! - `ports/` - Inbound operation traits, outbound collaborator traits
//! - `adapters/` - Ledgers, key-value stores, cipher, locks, time
//! - `service/` - `StackEngine`, the element codec and stack accessor
//! - `telemetry` - Tracing subscriber setup
//!
//! ## Usage
//!
//! ```ignore
//! use stack_engine::{BasicStackApi, EngineConfig, PlainValue, StackEngine, XChaChaElementCipher};
//!
//! let cipher = XChaChaElementCipher::from_env()?;
//! let engine = StackEngine::in_memory(cipher, EngineConfig::from_env());
//! let id = engine.create_stack(vec![])?;
//! engine.push(&id, PlainValue::new("a", 1.0))?;
//! let top = engine.pop(&id)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export key types for convenience
pub use adapters::{
    BincodeStackSerializer, FileBackedKVStore, InMemoryKVStore, InMemoryLedger, KvLedger,
    StackLocks, SystemTimeSource, XChaChaElementCipher,
};
pub use domain::{
    Checksum, CipherError, EngineConfig, ElementPredicate, ElementTransform, LedgerError,
    LogEntry, PairMatcher, PlainValue, SequenceError, Stack, StackError, StackId, StackLog,
    StackValue, Timestamp,
};
pub use ports::inbound::{BasicStackApi, BulkStackApi, DiagnosticsApi, NumericStackApi, QueryStackApi};
pub use ports::outbound::{ElementCipher, KeyValueStore, StackLedger, StackSerializer, TimeSource};
pub use service::{StackEngine, StackEngineDependencies};
pub use telemetry::{init_tracing, LogConfig, TelemetryError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
