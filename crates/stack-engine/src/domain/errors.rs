//! # Domain Errors
//!
//! Error types for the stack engine.
//!
//! - `SequenceError`: raised by the pure algorithms, carries no stack context
//! - `StackError`: what callers see, always names the stack and the operation
//! - `LedgerError` / `CipherError`: raised by the outbound ports

use super::entities::StackId;
use thiserror::Error;

/// Errors from the pure sequence algorithms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// The sequence has no elements.
    #[error("sequence is empty")]
    Empty,

    /// Fewer elements than the algorithm needs.
    #[error("need {required} elements, have {available}")]
    Insufficient {
        /// Elements required.
        required: usize,
        /// Elements present.
        available: usize,
    },

    /// Index outside the permitted range.
    #[error("index {index} out of bounds for length {len}")]
    OutOfBounds {
        /// Offending index.
        index: usize,
        /// Sequence length.
        len: usize,
    },

    /// The input makes the operation undefined.
    #[error("invalid operation: {0}")]
    Invalid(String),
}

/// Errors surfaced to engine callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    /// No stack under this id.
    #[error("{operation}: stack not found: {stack_id}")]
    StackNotFound {
        /// Stack id.
        stack_id: StackId,
        /// Attempted operation.
        operation: &'static str,
    },

    /// Searched element is not in the stack.
    #[error("{operation}: element not found in stack {stack_id}")]
    ElementNotFound {
        /// Stack id.
        stack_id: StackId,
        /// Attempted operation.
        operation: &'static str,
    },

    /// Operation requires at least one element.
    #[error("{operation}: stack {stack_id} is empty")]
    EmptyStack {
        /// Stack id.
        stack_id: StackId,
        /// Attempted operation.
        operation: &'static str,
    },

    /// Operation requires more elements than present.
    #[error("{operation}: stack {stack_id} has {available} elements, needs {required}")]
    InsufficientElements {
        /// Stack id.
        stack_id: StackId,
        /// Attempted operation.
        operation: &'static str,
        /// Elements required.
        required: usize,
        /// Elements present.
        available: usize,
    },

    /// Index outside the permitted range.
    #[error("{operation}: index {index} out of bounds for stack {stack_id} (len {len})")]
    IndexOutOfBounds {
        /// Stack id.
        stack_id: StackId,
        /// Attempted operation.
        operation: &'static str,
        /// Offending index.
        index: usize,
        /// Stack length.
        len: usize,
    },

    /// The cipher refused to encrypt; nothing was persisted.
    #[error("{operation}: encryption failed for stack {stack_id}: {reason}")]
    EncryptionError {
        /// Stack id.
        stack_id: StackId,
        /// Attempted operation.
        operation: &'static str,
        /// Cipher message.
        reason: String,
    },

    /// The cipher refused to decrypt a stored payload.
    #[error("{operation}: decryption failed for stack {stack_id}: {reason}")]
    DecryptionError {
        /// Stack id.
        stack_id: StackId,
        /// Attempted operation.
        operation: &'static str,
        /// Cipher message.
        reason: String,
    },

    /// Stored checksum does not match the decrypted plaintext.
    #[error("integrity check failed for stack {stack_id} at index {index}")]
    IntegrityCheckFailed {
        /// Stack id.
        stack_id: StackId,
        /// Corrupted element.
        index: usize,
    },

    /// Operation undefined for the current contents.
    #[error("{operation}: invalid operation on stack {stack_id}: {reason}")]
    InvalidOperation {
        /// Stack id.
        stack_id: StackId,
        /// Attempted operation.
        operation: &'static str,
        /// Why.
        reason: String,
    },

    /// The stack changed between fetch and persist. Retry the whole call.
    #[error("{operation}: version conflict on stack {stack_id}: based on {expected}, ledger at {actual}")]
    VersionConflict {
        /// Stack id.
        stack_id: StackId,
        /// Attempted operation.
        operation: &'static str,
        /// Version the write was based on.
        expected: u64,
        /// Version currently in the ledger.
        actual: u64,
    },

    /// Ledger I/O or encoding failure.
    #[error("{operation}: ledger error for stack {stack_id}: {message}")]
    Ledger {
        /// Stack id.
        stack_id: StackId,
        /// Attempted operation.
        operation: &'static str,
        /// Ledger message.
        message: String,
    },
}

impl StackError {
    /// Stack or element missing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StackError::StackNotFound { .. } | StackError::ElementNotFound { .. }
        )
    }

    /// Whether re-running the whole operation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StackError::VersionConflict { .. })
    }

    /// Attach stack context to an algorithm error.
    pub fn from_sequence(stack_id: &StackId, operation: &'static str, err: SequenceError) -> Self {
        let stack_id = stack_id.clone();
        match err {
            SequenceError::Empty => StackError::EmptyStack {
                stack_id,
                operation,
            },
            SequenceError::Insufficient {
                required,
                available,
            } => StackError::InsufficientElements {
                stack_id,
                operation,
                required,
                available,
            },
            SequenceError::OutOfBounds { index, len } => StackError::IndexOutOfBounds {
                stack_id,
                operation,
                index,
                len,
            },
            SequenceError::Invalid(reason) => StackError::InvalidOperation {
                stack_id,
                operation,
                reason,
            },
        }
    }

    /// Attach stack context to a ledger error.
    pub fn from_ledger(stack_id: &StackId, operation: &'static str, err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(id) => StackError::StackNotFound {
                stack_id: id,
                operation,
            },
            LedgerError::Conflict {
                stack_id,
                expected,
                actual,
            } => StackError::VersionConflict {
                stack_id,
                operation,
                expected,
                actual,
            },
            other => StackError::Ledger {
                stack_id: stack_id.clone(),
                operation,
                message: other.to_string(),
            },
        }
    }
}

/// Errors from a [`crate::StackLedger`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// No stack under this id.
    #[error("stack not found: {0}")]
    NotFound(StackId),

    /// Persist based on a stale version.
    #[error("version conflict on {stack_id}: expected {expected}, found {actual}")]
    Conflict {
        /// Stack id.
        stack_id: StackId,
        /// Version the write was based on.
        expected: u64,
        /// Version in the ledger.
        actual: u64,
    },

    /// Backend I/O failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// Encoding or decoding failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors from an [`crate::ElementCipher`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// Encryption failed.
    #[error("encrypt: {0}")]
    Encrypt(String),

    /// Decryption failed.
    #[error("decrypt: {0}")]
    Decrypt(String),
}
