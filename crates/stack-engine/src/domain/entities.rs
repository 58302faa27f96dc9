//! # Stack Entities
//!
//! Core entities persisted by the ledger.
//!
//! ## Ordering
//!
//! `Stack::values[0]` is the bottom, `values[len - 1]` is the top.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unix timestamp in seconds since epoch.
pub type Timestamp = u64;

/// Integrity digest of an element's plaintext.
pub type Checksum = [u8; 32];

/// Opaque stack identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StackId(String);

impl StackId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Decrypted view of one element.
///
/// Exists only inside an operation or in its return value; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PlainValue {
    /// Plaintext payload.
    pub data: Vec<u8>,
    /// Numeric facet.
    pub value: f64,
}

impl PlainValue {
    /// Create a plaintext element.
    pub fn new(data: impl Into<Vec<u8>>, value: f64) -> Self {
        Self {
            data: data.into(),
            value,
        }
    }

    /// Plaintext identity: two elements are the same member of a set when
    /// their payload bytes match, regardless of the numeric facet.
    pub fn same_identity(&self, other: &PlainValue) -> bool {
        self.data == other.data
    }
}

/// One element as stored in the ledger.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct StackValue {
    /// Ciphertext of the payload.
    pub data: Vec<u8>,
    /// Numeric facet, independent of the encrypted payload.
    pub value: f64,
    /// Digest of the plaintext payload.
    pub checksum: Checksum,
}

impl fmt::Debug for StackValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackValue")
            .field("data_len", &self.data.len())
            .field("value", &self.value)
            .field("checksum", &format_args!("{:02x?}..", &self.checksum[..4]))
            .finish()
    }
}

/// Persisted operation log record. `details` is ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackLog {
    /// Operation category (e.g. `push`, `stack_overflow`).
    pub operation: String,
    /// Encrypted details.
    pub details: Vec<u8>,
    /// When the entry was recorded.
    pub timestamp: Timestamp,
}

/// Decrypted view of a [`StackLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Operation category.
    pub operation: String,
    /// Plaintext details.
    pub details: String,
    /// When the entry was recorded.
    pub timestamp: Timestamp,
}

/// A named, versioned stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stack {
    /// Identifier in the ledger.
    pub id: StackId,
    /// Elements, bottom first.
    pub values: Vec<StackValue>,
    /// Append-only operation log.
    pub operation_logs: Vec<StackLog>,
    /// Last index touched by a write. Informational only.
    pub last_accessed_index: Option<usize>,
    /// Ledger version this copy was read at.
    pub version: u64,
}

impl Stack {
    /// Create a version-0 stack.
    pub fn new(id: StackId, values: Vec<StackValue>) -> Self {
        Self {
            id,
            values,
            operation_logs: Vec::new(),
            last_accessed_index: None,
            version: 0,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the stack holds no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Numeric facets, bottom first.
    pub fn facets(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.value).collect()
    }

    /// Append a log record, dropping the oldest ones beyond `retain`.
    pub fn record_log(&mut self, entry: StackLog, retain: Option<usize>) {
        self.operation_logs.push(entry);
        if let Some(max) = retain {
            let excess = self.operation_logs.len().saturating_sub(max);
            if excess > 0 {
                self.operation_logs.drain(..excess);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(value: f64) -> StackValue {
        StackValue {
            data: vec![1, 2, 3],
            value,
            checksum: [0xAB; 32],
        }
    }

    fn log(op: &str) -> StackLog {
        StackLog {
            operation: op.to_string(),
            details: vec![],
            timestamp: 1,
        }
    }

    #[test]
    fn test_stack_id_generate_unique() {
        assert_ne!(StackId::generate(), StackId::generate());
        assert_eq!(StackId::from("s-1").as_str(), "s-1");
    }

    #[test]
    fn test_same_identity_ignores_facet() {
        let a = PlainValue::new("x", 1.0);
        let b = PlainValue::new("x", 99.0);
        let c = PlainValue::new("y", 1.0);
        assert!(a.same_identity(&b));
        assert!(!a.same_identity(&c));
    }

    #[test]
    fn test_facets_bottom_first() {
        let stack = Stack::new(StackId::from("s"), vec![stored(1.0), stored(2.0)]);
        assert_eq!(stack.facets(), vec![1.0, 2.0]);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.version, 0);
    }

    #[test]
    fn test_record_log_retention() {
        let mut stack = Stack::new(StackId::from("s"), vec![]);
        for op in ["a", "b", "c"] {
            stack.record_log(log(op), Some(2));
        }
        let ops: Vec<_> = stack.operation_logs.iter().map(|l| l.operation.as_str()).collect();
        assert_eq!(ops, vec!["b", "c"]);
    }

    #[test]
    fn test_debug_hides_ciphertext() {
        let rendered = format!("{:?}", stored(1.0));
        assert!(rendered.contains("data_len: 3"));
    }
}
