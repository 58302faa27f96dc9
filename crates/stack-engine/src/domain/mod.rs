//! # Domain Layer
//!
//! Pure domain logic for the stack engine. Nothing here touches the ledger or
//! the cipher; the service layer wires those in.
//!
//! ## Modules
//!
//! - `entities` - Stack, StackValue, PlainValue, StackLog
//! - `config` - Engine configuration (capacity policy, log retention)
//! - `errors` - Engine, ledger and cipher error types
//! - `sequence` - Structural algorithms on ordered sequences
//! - `numeric` - Reductions over the numeric facet
//! - `set_ops` - Plaintext-identity set algebra
//! - `strategy` - Caller-supplied predicate/transform interfaces

pub mod config;
pub mod entities;
pub mod errors;
pub mod numeric;
pub mod sequence;
pub mod set_ops;
pub mod strategy;

pub use config::EngineConfig;
pub use entities::{Checksum, LogEntry, PlainValue, Stack, StackId, StackLog, StackValue, Timestamp};
pub use errors::{CipherError, LedgerError, SequenceError, StackError};
pub use strategy::{ElementPredicate, ElementTransform, PairMatcher};
