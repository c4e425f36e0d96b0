//! AES-256-GCM encryption with caller-supplied IVs.
//!
//! Two IV widths are supported: the standard 96-bit nonce and a 128-bit IV.
//! GCM accepts any IV length; non-96-bit IVs are compressed through GHASH
//! into the initial counter block, so both widths give the same 256-bit
//! confidentiality and 128-bit tag.
//!
//! Unlike a self-contained envelope, the IV is not prepended here. The
//! container codec owns the IV so it can be written once per container and
//! mixed with segment indices by the streaming driver.

use aes_gcm::aead::consts::{U12, U16};
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{Aes256Gcm, Nonce};

use crate::config::{KEY_SIZE, STANDARD_IV_SIZE, WIDE_IV_SIZE};
use crate::error::{Error, Result};

/// AES-256-GCM instantiated with a 128-bit IV.
type Aes256GcmWide = aes_gcm::AesGcm<Aes256, U16>;

enum Variant {
    Standard(Aes256Gcm),
    Wide(Aes256GcmWide),
}

pub struct AesGcm {
    inner: Variant,
}

impl AesGcm {
    /// Standard 96-bit nonce variant.
    #[inline]
    pub fn new(key: &[u8; KEY_SIZE]) -> Result<Self> {
        let inner = Aes256Gcm::new_from_slice(key).map_err(|_| Error::Encryption)?;
        Ok(Self { inner: Variant::Standard(inner) })
    }

    /// 128-bit IV variant.
    #[inline]
    pub fn new_wide(key: &[u8; KEY_SIZE]) -> Result<Self> {
        let inner = Aes256GcmWide::new_from_slice(key).map_err(|_| Error::Encryption)?;
        Ok(Self { inner: Variant::Wide(inner) })
    }

    #[inline]
    pub fn iv_len(&self) -> usize {
        match self.inner {
            Variant::Standard(_) => STANDARD_IV_SIZE,
            Variant::Wide(_) => WIDE_IV_SIZE,
        }
    }

    /// Returns `ciphertext || tag`.
    pub fn encrypt(&self, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        if plaintext.is_empty() {
            return Err(Error::EmptyInput);
        }
        self.check_iv(iv)?;

        let sealed = match &self.inner {
            Variant::Standard(cipher) => cipher.encrypt(Nonce::<U12>::from_slice(iv), plaintext),
            Variant::Wide(cipher) => cipher.encrypt(Nonce::<U16>::from_slice(iv), plaintext),
        };

        sealed.map_err(|_| Error::Encryption)
    }

    pub fn decrypt(&self, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.check_iv(iv)?;

        let opened = match &self.inner {
            Variant::Standard(cipher) => cipher.decrypt(Nonce::<U12>::from_slice(iv), ciphertext),
            Variant::Wide(cipher) => cipher.decrypt(Nonce::<U16>::from_slice(iv), ciphertext),
        };

        opened.map_err(|_| Error::Decryption)
    }

    fn check_iv(&self, iv: &[u8]) -> Result<()> {
        if iv.len() != self.iv_len() {
            return Err(Error::corrupted(format!("aes-gcm iv must be {} bytes, got {}", self.iv_len(), iv.len())));
        }
        Ok(())
    }
}
