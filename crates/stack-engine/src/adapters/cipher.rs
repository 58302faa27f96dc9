//! # XChaCha20-Poly1305 Element Cipher
//!
//! Default `ElementCipher`: payloads sealed with a random nonce per call,
//! checksums are BLAKE3 over plaintext.

use crate::domain::entities::Checksum;
use crate::domain::errors::CipherError;
use crate::ports::outbound::ElementCipher;
use stack_crypto::{CryptoError, SecretKey};

/// Environment variable holding a 64-hex-character key.
pub const KEY_ENV_VAR: &str = "STACK_ENCRYPTION_KEY";

/// Element cipher backed by `stack-crypto`.
#[derive(Debug, Clone)]
pub struct XChaChaElementCipher {
    key: SecretKey,
}

impl XChaChaElementCipher {
    /// Use the given key.
    pub fn new(key: SecretKey) -> Self {
        Self { key }
    }

    /// Use a freshly generated key. Data sealed with it is unreadable once the
    /// cipher is dropped.
    pub fn ephemeral() -> Self {
        Self::new(SecretKey::generate())
    }

    /// Parse a hex-encoded key.
    pub fn from_hex(encoded: &str) -> Result<Self, CryptoError> {
        SecretKey::from_hex(encoded).map(Self::new)
    }

    /// Read the key from `STACK_ENCRYPTION_KEY`.
    pub fn from_env() -> Result<Self, CryptoError> {
        let encoded = std::env::var(KEY_ENV_VAR).map_err(|_| {
            CryptoError::InvalidKeyEncoding(format!("{} is not set", KEY_ENV_VAR))
        })?;
        Self::from_hex(&encoded)
    }
}

impl ElementCipher for XChaChaElementCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        stack_crypto::seal(&self.key, plaintext).map_err(|e| CipherError::Encrypt(e.to_string()))
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        stack_crypto::open(&self.key, ciphertext).map_err(|e| CipherError::Decrypt(e.to_string()))
    }

    fn checksum(&self, plaintext: &[u8]) -> Checksum {
        stack_crypto::checksum(plaintext)
    }

    fn verify_checksum(&self, plaintext: &[u8], checksum: &Checksum) -> bool {
        stack_crypto::verify_checksum(plaintext, checksum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_and_checksum() {
        let cipher = XChaChaElementCipher::ephemeral();
        let sealed = cipher.encrypt(b"element").unwrap();
        assert_ne!(sealed, b"element");
        let opened = cipher.decrypt(&sealed).unwrap();
        assert!(cipher.verify_checksum(&opened, &cipher.checksum(b"element")));
    }

    #[test]
    fn test_foreign_key_cannot_decrypt() {
        let sealed = XChaChaElementCipher::ephemeral().encrypt(b"x").unwrap();
        let result = XChaChaElementCipher::ephemeral().decrypt(&sealed);
        assert!(matches!(result, Err(CipherError::Decrypt(_))));
    }

    #[test]
    fn test_from_hex() {
        let a = XChaChaElementCipher::from_hex(&"11".repeat(32)).unwrap();
        let b = XChaChaElementCipher::from_hex(&"11".repeat(32)).unwrap();
        let sealed = a.encrypt(b"shared").unwrap();
        assert_eq!(b.decrypt(&sealed).unwrap(), b"shared");
        assert!(XChaChaElementCipher::from_hex("short").is_err());
    }
}
