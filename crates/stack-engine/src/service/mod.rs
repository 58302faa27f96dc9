//! # Stack Engine Service
//!
//! The application service implementing every inbound port.
//!
//! ## Architecture
//!
//! - `accessor` - Stack Accessor: fetch / persist / the locked mutation unit
//! - `codec` - Element Codec: encrypt, decrypt, checksum
//! - `basic` - push, pop, peek and the index operations
//! - `bulk` - multi-element and set operations
//! - `numeric` - reductions over the numeric facet
//! - `query` - predicates, search, sort
//! - `diagnostics` - logs, bounds and integrity checks
//!
//! All collaborators are injected, as in the other services of this
//! workspace.

mod accessor;
mod basic;
mod bulk;
mod codec;
mod diagnostics;
mod numeric;
mod query;

use crate::adapters::{InMemoryLedger, StackLocks, SystemTimeSource, XChaChaElementCipher};
use crate::domain::config::EngineConfig;
use crate::domain::errors::StackError;
use crate::ports::outbound::{ElementCipher, StackLedger, TimeSource};

/// Operation names, used in logs, errors and the operation log.
#[allow(missing_docs)]
pub mod operations {
    pub const CREATE: &str = "create_stack";
    pub const SIZE: &str = "size";
    pub const PUSH: &str = "push";
    pub const POP: &str = "pop";
    pub const PEEK: &str = "peek";
    pub const PEEK_AT: &str = "peek_at";
    pub const CLEAR: &str = "clear";
    pub const DUPLICATE: &str = "duplicate";
    pub const SWAP_TOP: &str = "swap_top";
    pub const ROTATE_TOP3: &str = "rotate_top3";
    pub const COPY_TO_TOP: &str = "copy_to_top";
    pub const REPLACE_AT: &str = "replace_at";
    pub const INSERT_AT: &str = "insert_at";
    pub const REMOVE_AT: &str = "remove_at";
    pub const PUSH_MULTIPLE: &str = "push_multiple";
    pub const POP_MULTIPLE: &str = "pop_multiple";
    pub const SPLIT: &str = "split";
    pub const MERGE: &str = "merge";
    pub const CLONE: &str = "clone_stack";
    pub const REVERSE: &str = "reverse";
    pub const DIFFERENCE: &str = "difference";
    pub const UNION: &str = "union";
    pub const INTERSECTION: &str = "intersection";
    pub const EXCLUSIVE: &str = "exclusive_elements";
    pub const SUM: &str = "sum";
    pub const PRODUCT: &str = "product";
    pub const AVERAGE: &str = "average";
    pub const VARIANCE: &str = "variance";
    pub const STANDARD_DEVIATION: &str = "standard_deviation";
    pub const MEDIAN: &str = "median";
    pub const MIN: &str = "min_value";
    pub const MAX: &str = "max_value";
    pub const MODULO: &str = "modulo";
    pub const NORMALIZE: &str = "normalize";
    pub const SORT: &str = "sort";
    pub const IS_SORTED: &str = "is_sorted";
    pub const FILTER: &str = "filter";
    pub const MAP: &str = "map";
    pub const ACCUMULATE: &str = "accumulate";
    pub const SEARCH: &str = "search";
    pub const CONTAINS: &str = "contains";
    pub const REMOVE_DUPLICATES: &str = "remove_duplicates";
    pub const CHECK_UNIQUENESS: &str = "check_uniqueness";
    pub const CHECK_BALANCE: &str = "check_balance";
    pub const RANGE: &str = "range";
    pub const SET_CONDITIONALLY: &str = "set_value_conditionally";
    pub const GET_SUBSECTION: &str = "get_subsection";
    pub const COUNT_MATCHES: &str = "count_matches";
    pub const LAST_ACCESSED: &str = "last_accessed_index";
    pub const APPEND_LOG: &str = "append_operation_log";
    pub const OPERATION_LOGS: &str = "operation_logs";
    pub const STACK_OVERFLOW: &str = "stack_overflow";
    pub const STACK_UNDERFLOW: &str = "stack_underflow";
    pub const VALIDATE_BOUNDS: &str = "validate_bounds";
    pub const VALIDATE_INTEGRITY: &str = "validate_integrity";
}

/// The stack engine.
///
/// Stateless between calls apart from the per-stack lock registry; every
/// operation reads the ledger afresh.
pub struct StackEngine<L, C, T = SystemTimeSource>
where
    L: StackLedger,
    C: ElementCipher,
    T: TimeSource,
{
    /// Durable stack storage.
    pub(crate) ledger: L,
    /// Element codec backend.
    pub(crate) cipher: C,
    /// Clock for log timestamps.
    pub(crate) time_source: T,
    /// Capacity and log policy.
    pub(crate) config: EngineConfig,
    /// Per-stack serialization of mutation units.
    pub(crate) locks: StackLocks,
}

/// Dependencies for StackEngine
pub struct StackEngineDependencies<L, C, T> {
    /// Durable stack storage.
    pub ledger: L,
    /// Element cipher.
    pub cipher: C,
    /// Clock for log timestamps.
    pub time_source: T,
}

impl<L, C, T> StackEngine<L, C, T>
where
    L: StackLedger,
    C: ElementCipher,
    T: TimeSource,
{
    /// Create an engine over the given collaborators.
    pub fn new(deps: StackEngineDependencies<L, C, T>, config: EngineConfig) -> Self {
        tracing::debug!(
            "[stack] Engine ready (capacity: {:?}, record_operations: {})",
            config.capacity,
            config.record_operations
        );
        Self {
            ledger: deps.ledger,
            cipher: deps.cipher,
            time_source: deps.time_source,
            config,
            locks: StackLocks::new(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The ledger this engine writes to.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Re-run `op` while it fails with `VersionConflict`, at most `attempts`
    /// times in total. Any other error is returned immediately.
    ///
    /// The engine never retries on its own; this is for callers that share a
    /// ledger with other processes.
    pub fn with_retry<R, F>(&self, attempts: usize, mut op: F) -> Result<R, StackError>
    where
        F: FnMut(&Self) -> Result<R, StackError>,
    {
        let attempts = attempts.max(1);
        let mut attempt = 1;
        loop {
            match op(self) {
                Err(e) if e.is_retryable() && attempt < attempts => {
                    tracing::debug!("[stack] Retrying after conflict ({}/{}): {}", attempt, attempts, e);
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}

impl StackEngine<InMemoryLedger, XChaChaElementCipher, SystemTimeSource> {
    /// Engine over an in-memory ledger.
    pub fn in_memory(cipher: XChaChaElementCipher, config: EngineConfig) -> Self {
        Self::new(
            StackEngineDependencies {
                ledger: InMemoryLedger::new(),
                cipher,
                time_source: SystemTimeSource,
            },
            config,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::StackId;
    use crate::test_utils::make_engine;

    fn conflict() -> StackError {
        StackError::VersionConflict {
            stack_id: StackId::from("s"),
            operation: operations::PUSH,
            expected: 0,
            actual: 1,
        }
    }

    #[test]
    fn test_with_retry_retries_conflicts_only() {
        let engine = make_engine();

        let mut calls = 0;
        let result = engine.with_retry(3, |_| {
            calls += 1;
            if calls < 3 {
                Err(conflict())
            } else {
                Ok(calls)
            }
        });
        assert_eq!(result.unwrap(), 3);

        let mut calls = 0;
        let result: Result<(), _> = engine.with_retry(5, |_| {
            calls += 1;
            Err(StackError::EmptyStack {
                stack_id: StackId::from("s"),
                operation: operations::POP,
            })
        });
        assert!(matches!(result, Err(StackError::EmptyStack { .. })));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_with_retry_gives_up() {
        let engine = make_engine();
        let mut calls = 0;
        let result: Result<(), _> = engine.with_retry(2, |_| {
            calls += 1;
            Err(conflict())
        });
        assert!(result.unwrap_err().is_retryable());
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_in_memory_constructor() {
        let engine = StackEngine::in_memory(XChaChaElementCipher::ephemeral(), EngineConfig::default());
        assert!(engine.ledger().is_empty());
        assert_eq!(engine.config().capacity, None);
    }
}
