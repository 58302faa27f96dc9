//! # Plaintext Checksums
//!
//! BLAKE3 digests over element plaintext. Checksums are always computed on the
//! plaintext so that re-sealing a payload never invalidates them.

/// Checksum length in bytes.
pub const CHECKSUM_LEN: usize = 32;

/// BLAKE3 digest of a plaintext payload.
pub type Checksum = [u8; CHECKSUM_LEN];

/// Compute the checksum of `plaintext`.
pub fn checksum(plaintext: &[u8]) -> Checksum {
    *blake3::hash(plaintext).as_bytes()
}

/// Verify `plaintext` against an expected checksum.
///
/// Comparison goes through `blake3::Hash` equality, which is constant-time.
pub fn verify_checksum(plaintext: &[u8], expected: &Checksum) -> bool {
    blake3::hash(plaintext) == blake3::Hash::from(*expected)
}
