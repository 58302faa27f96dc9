//! # Stack Crypto - Element Sealing Primitives
//!
//! Cryptography used by the default element codec of the stack engine.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `seal` | XChaCha20-Poly1305 | Encrypting element payloads and log details |
//! | `checksum` | BLAKE3 | Plaintext integrity digests |
//!
//! ## Sealed Layout
//!
//! ```text
//! [ nonce (24 bytes) | ciphertext + poly1305 tag (len + 16 bytes) ]
//! ```
//!
//! The nonce is random per call, so sealing the same plaintext twice yields
//! different bytes. Equality of payloads must be decided on plaintext.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod checksum;
pub mod errors;
pub mod seal;

// Re-exports
pub use checksum::{checksum, verify_checksum, Checksum, CHECKSUM_LEN};
pub use errors::CryptoError;
pub use seal::{open, seal, SecretKey, NONCE_LEN, TAG_LEN};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
