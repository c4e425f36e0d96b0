//! Content integrity verification using SHA-256.
//!
//! The streaming driver feeds every plaintext chunk through a
//! [`ContentHasher`] while encrypting and records the lowercase hex digest in
//! the container metadata. After decryption, [`verify`] recomputes the digest
//! and compares it with the recorded one.
//!
//! A mismatch is a warning, not an error: the decrypted data is still handed
//! back to the caller, flagged as [`Integrity::Mismatch`].

use sha2::{Digest, Sha256, Sha384, Sha512};
use strum::{Display, EnumIter, EnumString};
use subtle::ConstantTimeEq;

/// Incremental SHA-256 over plaintext chunks.
#[derive(Default)]
pub struct ContentHasher {
    inner: Sha256,
}

impl ContentHasher {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn update(&mut self, chunk: &[u8]) {
        self.inner.update(chunk);
    }

    /// Lowercase hex digest.
    pub fn finalize_hex(self) -> String {
        hex::encode(self.inner.finalize())
    }
}

/// Outcome of the post-decryption integrity check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Integrity {
    /// The recomputed digest matches the recorded one.
    Verified,
    /// The recomputed digest differs from the recorded one.
    Mismatch,
    /// The container carried no digest.
    Unchecked,
}

impl Integrity {
    pub(crate) fn check(data: &[u8], recorded: Option<&str>) -> Self {
        match recorded {
            Some(hash) if verify(data, hash) => Self::Verified,
            Some(_) => Self::Mismatch,
            None => Self::Unchecked,
        }
    }
}

/// Recomputes the SHA-256 of `data` and compares it with `recorded_hash`.
///
/// The recorded digest is hex and compared case-insensitively. A digest
/// that is not valid hex never matches.
pub fn verify(data: &[u8], recorded_hash: &str) -> bool {
    let Ok(expected) = hex::decode(recorded_hash.trim()) else {
        return false;
    };

    let computed = Sha256::digest(data);
    expected.len() == computed.len() && bool::from(computed.as_slice().ct_eq(&expected))
}

/// Digest algorithms offered by the hash generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum HashAlgorithm {
    #[default]
    #[strum(to_string = "SHA-256", serialize = "sha256")]
    Sha256,
    #[strum(to_string = "SHA-384", serialize = "sha384")]
    Sha384,
    #[strum(to_string = "SHA-512", serialize = "sha512")]
    Sha512,
}

/// Lowercase hex digest of `data`.
pub fn digest_hex(data: &[u8], algorithm: HashAlgorithm) -> String {
    match algorithm {
        HashAlgorithm::Sha256 => hex::encode(Sha256::digest(data)),
        HashAlgorithm::Sha384 => hex::encode(Sha384::digest(data)),
        HashAlgorithm::Sha512 => hex::encode(Sha512::digest(data)),
    }
}
