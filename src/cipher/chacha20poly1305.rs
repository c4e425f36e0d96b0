//! ChaCha20-Poly1305 encryption implementation.
//!
//! This module wraps the `chacha20poly1305` crate with the IETF (RFC 8439)
//! construction.
//!
//! # Implementation Details
//!
//! - **Key Size**: 256 bits (32 bytes)
//! - **Nonce Size**: 96 bits (12 bytes), supplied by the caller
//! - **Tag Size**: 128 bits (16 bytes), appended automatically
//! - **Output Format**: `[Ciphertext] || [Auth Tag (16 bytes)]`
//!
//! The 96-bit nonce is the same width as AES-GCM's, so containers sealed with
//! either algorithm share one header layout. Uniqueness of nonces under a key
//! is the caller's job: the streaming driver derives a distinct nonce for
//! every segment from the container's random base IV.

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305 as Inner, Nonce};

use crate::config::{KEY_SIZE, STANDARD_IV_SIZE};
use crate::error::{Error, Result};

/// A wrapper struct for ChaCha20-Poly1305 encryption operations.
pub struct ChaCha20Poly1305 {
    /// The initialized cipher state.
    inner: Inner,
}

impl ChaCha20Poly1305 {
    /// Initializes a new ChaCha20-Poly1305 context with the provided key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key length is invalid.
    #[inline]
    pub fn new(key: &[u8; KEY_SIZE]) -> Result<Self> {
        let inner = Inner::new_from_slice(key).map_err(|_| Error::Encryption)?;
        Ok(Self { inner })
    }

    /// Encrypts the plaintext under the given nonce.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The plaintext is empty.
    /// - The nonce is not 12 bytes.
    /// - Encryption fails.
    #[inline]
    pub fn encrypt(&self, nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        if plaintext.is_empty() {
            return Err(Error::EmptyInput);
        }
        Self::check_nonce(nonce)?;

        // The inner encrypt method appends the 16-byte Poly1305 tag.
        self.inner.encrypt(Nonce::from_slice(nonce), plaintext).map_err(|_| Error::Encryption)
    }

    /// Decrypts and authenticates `ciphertext || tag`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decryption`] if the authentication tag does not verify.
    #[inline]
    pub fn decrypt(&self, nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        Self::check_nonce(nonce)?;

        self.inner.decrypt(Nonce::from_slice(nonce), ciphertext).map_err(|_| Error::Decryption)
    }

    fn check_nonce(nonce: &[u8]) -> Result<()> {
        if nonce.len() != STANDARD_IV_SIZE {
            return Err(Error::corrupted(format!("chacha20poly1305 nonce must be {STANDARD_IV_SIZE} bytes, got {}", nonce.len())));
        }
        Ok(())
    }
}
