//! # Cryptographic Operations Module
//!
//! Authenticated encryption and key handling for cryptkit containers.
//!
//! ## Architecture
//!
//! - **Algorithm Layer**: [`Algorithm`] names the AEAD a container was sealed
//!   with and fixes its IV width
//! - **Implementation Layer**: [`AesGcm`] and [`ChaCha20Poly1305`] wrap the
//!   RustCrypto AEADs behind one calling convention (`iv`, `data`)
//! - **Abstraction Layer**: [`Cipher`] binds a derived key to one algorithm
//! - **Support Layer**: PBKDF2 derivation, SHA-256 integrity hashing, random
//!   key generation
//!
//! ## Nonce Management
//!
//! Every container carries a single random base IV drawn by [`generate_iv`].
//! Individual segments (the metadata block and each chunk) are sealed under
//! [`segment_nonce`], which mixes the segment index into the trailing bytes
//! of the base IV. Within a container no nonce repeats; across containers
//! the random salt already yields a distinct key.

use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

mod aes_gcm;
mod chacha20poly1305;
pub mod derive;
pub mod hash;
pub mod keygen;

pub use aes_gcm::AesGcm;
pub use chacha20poly1305::ChaCha20Poly1305;
pub use derive::{Derive, DerivedKey, derive_key};
pub use hash::{ContentHasher, HashAlgorithm, Integrity, digest_hex, verify};
pub use keygen::{KeyLength, generate_key};

use crate::config::{NONCE_COUNTER_SIZE, STANDARD_IV_SIZE, WIDE_IV_SIZE};
use crate::error::Result;

/// AEAD algorithms a container can be sealed with.
///
/// Serialized by name in container metadata.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum Algorithm {
    /// AES-256-GCM with a 96-bit IV.
    #[default]
    #[serde(rename = "AES-GCM")]
    #[strum(to_string = "AES-GCM")]
    AesGcm,

    /// AES-256-GCM with a 128-bit IV.
    #[serde(rename = "AES-GCM-IV16")]
    #[strum(to_string = "AES-GCM-IV16")]
    AesGcmIv16,

    /// ChaCha20-Poly1305 (RFC 8439) with a 96-bit nonce.
    #[serde(rename = "ChaCha20-Poly1305")]
    #[strum(to_string = "ChaCha20-Poly1305")]
    ChaCha20Poly1305,
}

impl Algorithm {
    /// IV length stored in the container header.
    #[inline]
    pub const fn iv_len(self) -> usize {
        match self {
            Self::AesGcm | Self::ChaCha20Poly1305 => STANDARD_IV_SIZE,
            Self::AesGcmIv16 => WIDE_IV_SIZE,
        }
    }
}

enum Engine {
    Aes(AesGcm),
    ChaCha(ChaCha20Poly1305),
}

/// # Unified Cipher Interface
///
/// A derived key bound to one [`Algorithm`]. Output of [`Cipher::encrypt`]
/// is `ciphertext || tag`; the IV is managed by the caller.
pub struct Cipher {
    engine: Engine,
    algorithm: Algorithm,
}

impl Cipher {
    pub fn new(key: &DerivedKey, algorithm: Algorithm) -> Result<Self> {
        let key = key.expose_secret();
        let engine = match algorithm {
            Algorithm::AesGcm => Engine::Aes(AesGcm::new(key)?),
            Algorithm::AesGcmIv16 => Engine::Aes(AesGcm::new_wide(key)?),
            Algorithm::ChaCha20Poly1305 => Engine::ChaCha(ChaCha20Poly1305::new(key)?),
        };

        Ok(Self { engine, algorithm })
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// # Errors
    /// [`crate::Error::EmptyInput`] for empty plaintext,
    /// [`crate::Error::Corrupted`] for a wrong-sized IV,
    /// [`crate::Error::Encryption`] if the primitive fails.
    #[inline]
    pub fn encrypt(&self, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        match &self.engine {
            Engine::Aes(cipher) => cipher.encrypt(iv, plaintext),
            Engine::ChaCha(cipher) => cipher.encrypt(iv, plaintext),
        }
    }

    /// # Errors
    /// [`crate::Error::Decryption`] when the tag does not verify: wrong key,
    /// wrong IV, or modified ciphertext.
    #[inline]
    pub fn decrypt(&self, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        match &self.engine {
            Engine::Aes(cipher) => cipher.decrypt(iv, ciphertext),
            Engine::ChaCha(cipher) => cipher.decrypt(iv, ciphertext),
        }
    }
}

/// Draws a fresh random base IV for `algorithm`.
pub fn generate_iv(algorithm: Algorithm) -> Result<Vec<u8>> {
    let mut iv = vec![0u8; algorithm.iv_len()];
    OsRng.try_fill_bytes(&mut iv)?;
    Ok(iv)
}

/// Nonce for segment `index` of a container: the base IV with its last
/// 8 bytes XORed with `index` (big-endian). Index 0 is the base IV itself.
pub fn segment_nonce(base_iv: &[u8], index: u64) -> Vec<u8> {
    let mut nonce = base_iv.to_vec();
    let offset = nonce.len().saturating_sub(NONCE_COUNTER_SIZE);
    for (byte, counter) in nonce[offset..].iter_mut().zip(index.to_be_bytes()) {
        *byte ^= counter;
    }
    nonce
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::config::SALT_LEN;

    fn key() -> DerivedKey {
        Derive::new(b"password").unwrap().derive_key(&[0u8; SALT_LEN])
    }

    #[test]
    fn test_every_algorithm_roundtrips() {
        let key = key();
        for algorithm in Algorithm::iter() {
            let cipher = Cipher::new(&key, algorithm).unwrap();
            let iv = generate_iv(algorithm).unwrap();
            assert_eq!(iv.len(), algorithm.iv_len());

            let sealed = cipher.encrypt(&iv, b"payload").unwrap();
            assert_eq!(cipher.decrypt(&iv, &sealed).unwrap(), b"payload");
        }
    }

    #[test]
    fn test_algorithms_do_not_cross_decrypt() {
        let key = key();
        let iv = generate_iv(Algorithm::AesGcm).unwrap();
        let sealed = Cipher::new(&key, Algorithm::AesGcm).unwrap().encrypt(&iv, b"payload").unwrap();
        assert!(Cipher::new(&key, Algorithm::ChaCha20Poly1305).unwrap().decrypt(&iv, &sealed).is_err());
    }

    #[test]
    fn test_segment_nonce() {
        let base = [0xAAu8; STANDARD_IV_SIZE];
        assert_eq!(segment_nonce(&base, 0), base.to_vec());

        let first = segment_nonce(&base, 1);
        assert_eq!(first[..4], base[..4]);
        assert_eq!(first[STANDARD_IV_SIZE - 1], 0xAB);

        let nonces: std::collections::HashSet<Vec<u8>> = (0..1000).map(|i| segment_nonce(&base, i)).collect();
        assert_eq!(nonces.len(), 1000);
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(Algorithm::AesGcm.to_string(), "AES-GCM");
        assert_eq!("chacha20-poly1305".parse::<Algorithm>().unwrap(), Algorithm::ChaCha20Poly1305);
        assert_eq!(serde_json::to_string(&Algorithm::AesGcmIv16).unwrap(), "\"AES-GCM-IV16\"");
        assert_eq!(Algorithm::AesGcmIv16.iv_len(), WIDE_IV_SIZE);
    }
}
