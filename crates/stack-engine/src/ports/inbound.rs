//! # Inbound Ports (Driving Ports)
//!
//! The operations the engine exposes, grouped by family. Every mutating
//! operation is a single fetch → transform → persist unit; a failure at any
//! step leaves the ledger copy untouched.

use crate::domain::entities::{LogEntry, PlainValue, StackId};
use crate::domain::errors::StackError;
use crate::domain::strategy::{ElementPredicate, ElementTransform, PairMatcher};

/// Classical stack operations. Top is the last element.
pub trait BasicStackApi {
    /// Create a stack holding `values` (bottom first), encrypting each.
    fn create_stack(&self, values: Vec<PlainValue>) -> Result<StackId, StackError>;

    /// Number of elements.
    fn size(&self, id: &StackId) -> Result<usize, StackError>;

    /// Whether the stack holds no elements.
    fn is_empty(&self, id: &StackId) -> Result<bool, StackError>;

    /// Encrypt and append.
    ///
    /// Never fails on capacity; exceeding the configured capacity records a
    /// `stack_overflow` log entry.
    fn push(&self, id: &StackId, value: PlainValue) -> Result<(), StackError>;

    /// Remove and decrypt the top.
    ///
    /// ## Errors
    ///
    /// - `EmptyStack`: no elements
    /// - `DecryptionError`: the stack is left unchanged
    fn pop(&self, id: &StackId) -> Result<PlainValue, StackError>;

    /// Decrypt the top without removing it.
    fn peek(&self, id: &StackId) -> Result<PlainValue, StackError>;

    /// Decrypt the element `depth` positions below the top (0 = top).
    fn peek_at(&self, id: &StackId, depth: usize) -> Result<PlainValue, StackError>;

    /// Remove every element.
    fn clear(&self, id: &StackId) -> Result<(), StackError>;

    /// Push a copy of the top.
    fn duplicate(&self, id: &StackId) -> Result<(), StackError>;

    /// Exchange the top two elements.
    fn swap_top(&self, id: &StackId) -> Result<(), StackError>;

    /// `[.., a, b, c]` becomes `[.., c, a, b]`.
    fn rotate_top3(&self, id: &StackId) -> Result<(), StackError>;

    /// Push a copy of `values[index]`.
    fn copy_to_top(&self, id: &StackId, index: usize) -> Result<(), StackError>;

    /// Encrypt `value` and overwrite `values[index]`.
    fn replace_at(&self, id: &StackId, index: usize, value: PlainValue) -> Result<(), StackError>;

    /// Encrypt `value` and insert it before `index`; `index == len` appends.
    fn insert_at(&self, id: &StackId, index: usize, value: PlainValue) -> Result<(), StackError>;

    /// Remove `values[index]`, shifting the elements above it down.
    fn remove_at(&self, id: &StackId, index: usize) -> Result<(), StackError>;
}

/// Whole-sequence and set operations.
pub trait BulkStackApi {
    /// Encrypt and append each value in order. One encryption failure aborts
    /// the whole batch.
    fn push_multiple(&self, id: &StackId, values: Vec<PlainValue>) -> Result<(), StackError>;

    /// Remove the top `count` elements, returned bottom of the removed segment
    /// first.
    fn pop_multiple(&self, id: &StackId, count: usize) -> Result<Vec<PlainValue>, StackError>;

    /// Copy `values[..index]` and `values[index..]` into two new stacks. The
    /// source is not modified.
    ///
    /// The halves are created one after the other. If the second `create`
    /// fails, the lower half stays in the ledger and the error is returned;
    /// its id is logged at `warn` level.
    fn split(&self, id: &StackId, index: usize) -> Result<(StackId, StackId), StackError>;

    /// New stack holding `a ++ b`. Sources are not modified.
    fn merge(&self, a: &StackId, b: &StackId) -> Result<StackId, StackError>;

    /// New stack holding a copy of the ciphertext of every element.
    fn clone_stack(&self, id: &StackId) -> Result<StackId, StackError>;

    /// Reverse element order.
    fn reverse(&self, id: &StackId) -> Result<(), StackError>;

    /// Elements of `a` not in `b`, by plaintext identity. Unordered.
    fn difference(&self, a: &StackId, b: &StackId) -> Result<Vec<PlainValue>, StackError>;

    /// Elements in either stack, de-duplicated by plaintext identity. Unordered.
    fn union(&self, a: &StackId, b: &StackId) -> Result<Vec<PlainValue>, StackError>;

    /// Elements in both stacks, by plaintext identity. Unordered.
    fn intersection(&self, a: &StackId, b: &StackId) -> Result<Vec<PlainValue>, StackError>;

    /// Elements in exactly one of the stacks. Unordered.
    fn exclusive_elements(&self, a: &StackId, b: &StackId)
        -> Result<Vec<PlainValue>, StackError>;
}

/// Reductions and transforms over the numeric facet. No decryption.
pub trait NumericStackApi {
    /// Sum of facets (0 when empty).
    fn sum(&self, id: &StackId) -> Result<f64, StackError>;

    /// Product of facets (1 when empty).
    fn product(&self, id: &StackId) -> Result<f64, StackError>;

    /// Mean of facets.
    fn average(&self, id: &StackId) -> Result<f64, StackError>;

    /// Population variance of facets.
    fn variance(&self, id: &StackId) -> Result<f64, StackError>;

    /// Square root of the population variance.
    fn standard_deviation(&self, id: &StackId) -> Result<f64, StackError>;

    /// Median of facets.
    fn median(&self, id: &StackId) -> Result<f64, StackError>;

    /// Smallest facet.
    fn min_value(&self, id: &StackId) -> Result<f64, StackError>;

    /// Largest facet.
    fn max_value(&self, id: &StackId) -> Result<f64, StackError>;

    /// Replace the top two with `second mod top`, keeping the lower element's
    /// payload. Returns the result.
    fn modulo(&self, id: &StackId) -> Result<f64, StackError>;

    /// `|v|` for every facet.
    fn absolute_values(&self, id: &StackId) -> Result<(), StackError>;

    /// `v ^ exponent` for every facet.
    fn power_values(&self, id: &StackId, exponent: f64) -> Result<(), StackError>;

    /// `e ^ v` for every facet.
    fn exponential_values(&self, id: &StackId) -> Result<(), StackError>;

    /// Floor every facet.
    fn floor_values(&self, id: &StackId) -> Result<(), StackError>;

    /// Ceiling every facet.
    fn ceiling_values(&self, id: &StackId) -> Result<(), StackError>;

    /// Round every facet.
    fn round_values(&self, id: &StackId) -> Result<(), StackError>;

    /// Rescale facets onto `[0, 1]`.
    fn normalize(&self, id: &StackId) -> Result<(), StackError>;
}

/// Predicate, search and ordering operations.
pub trait QueryStackApi {
    /// Stable sort by facet.
    fn sort(&self, id: &StackId, ascending: bool) -> Result<(), StackError>;

    /// Whether facets are already ordered.
    fn is_sorted(&self, id: &StackId, ascending: bool) -> Result<bool, StackError>;

    /// Decrypted copies of matching elements, bottom first.
    fn filter<P: ElementPredicate>(
        &self,
        id: &StackId,
        predicate: P,
    ) -> Result<Vec<PlainValue>, StackError>;

    /// Rewrite every element, re-encrypting the results.
    fn map<T: ElementTransform>(&self, id: &StackId, transform: T) -> Result<(), StackError>;

    /// Left fold over facets, bottom first.
    fn accumulate<F>(&self, id: &StackId, fold: F, initial: f64) -> Result<f64, StackError>
    where
        F: Fn(f64, f64) -> f64;

    /// Index of the first element whose plaintext equals `target`.
    ///
    /// ## Errors
    ///
    /// - `ElementNotFound`: no match
    fn search(&self, id: &StackId, target: &[u8]) -> Result<usize, StackError>;

    /// `search` with a missing element reported as `false`.
    fn contains(&self, id: &StackId, target: &[u8]) -> Result<bool, StackError>;

    /// Keep the first occurrence of each plaintext. Returns how many were
    /// removed.
    fn remove_duplicates(&self, id: &StackId) -> Result<usize, StackError>;

    /// Whether no plaintext occurs twice.
    fn check_uniqueness(&self, id: &StackId) -> Result<bool, StackError>;

    /// Pair `(0,1), (2,3), ..` and test each pair. Odd length is `false`.
    fn check_balance<M: PairMatcher>(&self, id: &StackId, matcher: M) -> Result<bool, StackError>;

    /// Decrypted copies of `values[start..=end]`.
    fn range(&self, id: &StackId, start: usize, end: usize)
        -> Result<Vec<PlainValue>, StackError>;

    /// Overwrite every match with an encrypted copy of `new_value`. Returns the
    /// number replaced.
    fn set_value_conditionally<P: ElementPredicate>(
        &self,
        id: &StackId,
        predicate: P,
        new_value: PlainValue,
    ) -> Result<usize, StackError>;

    /// Decrypted copies of matching elements.
    fn get_subsection<P: ElementPredicate>(
        &self,
        id: &StackId,
        predicate: P,
    ) -> Result<Vec<PlainValue>, StackError>;

    /// Number of matching elements.
    fn count_matches<P: ElementPredicate>(
        &self,
        id: &StackId,
        predicate: P,
    ) -> Result<usize, StackError>;
}

/// Metadata and integrity diagnostics.
pub trait DiagnosticsApi {
    /// Last index touched by a write.
    fn last_accessed_index(&self, id: &StackId) -> Result<Option<usize>, StackError>;

    /// Append an entry with encrypted `details`.
    fn append_operation_log(
        &self,
        id: &StackId,
        operation: &str,
        details: &str,
    ) -> Result<(), StackError>;

    /// All retained log entries with details decrypted, oldest first.
    fn operation_logs(&self, id: &StackId) -> Result<Vec<LogEntry>, StackError>;

    /// Record a `stack_overflow` entry.
    fn log_stack_overflow(&self, id: &StackId) -> Result<(), StackError>;

    /// Record a `stack_underflow` entry.
    fn log_stack_underflow(&self, id: &StackId) -> Result<(), StackError>;

    /// Fail with `IndexOutOfBounds` unless `index < len`.
    fn validate_bounds(&self, id: &StackId, index: usize) -> Result<(), StackError>;

    /// Decrypt every element and verify its checksum.
    ///
    /// ## Errors
    ///
    /// - `DecryptionError`: a payload could not be opened
    /// - `IntegrityCheckFailed`: first element whose checksum mismatches
    fn validate_integrity(&self, id: &StackId) -> Result<(), StackError>;
}
