//! Crypto error types.

use thiserror::Error;

/// Errors raised while sealing or opening element payloads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed (wrong key, tampered bytes, or bad tag)
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Sealed payload shorter than nonce + tag
    #[error("Sealed payload truncated: {len} bytes, need at least {min}")]
    Truncated {
        /// Length of the supplied payload
        len: usize,
        /// Minimum valid length
        min: usize,
    },

    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },

    /// Key material was not valid hex
    #[error("Invalid key encoding: {0}")]
    InvalidKeyEncoding(String),
}
