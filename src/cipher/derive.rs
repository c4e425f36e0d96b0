//! # Key Derivation with PBKDF2
//!
//! Turns a user password and a per-operation random salt into a 256-bit
//! symmetric key using PBKDF2 with HMAC-SHA-256.
//!
//! ## Parameters
//!
//! - **Iterations**: fixed at [`PBKDF2_ITERATIONS`]; not a caller parameter
//! - **Salt**: [`SALT_LEN`] bytes, drawn fresh for every encryption
//! - **Output Length**: [`KEY_SIZE`] bytes, shared by every supported AEAD
//!
//! The derivation is CPU-bound. [`derive_key`] moves it onto Tokio's blocking
//! pool so the calling task suspends instead of stalling the runtime.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use rand::rngs::OsRng;
use secrecy::{ExposeSecret, SecretBox};
use sha2::Sha256;

use crate::config::{KEY_SIZE, PBKDF2_ITERATIONS, SALT_LEN};
use crate::error::{Error, Result};
use crate::secret::{Secret, SecretBytes};

/// A derived symmetric key. Zeroized on drop.
pub struct DerivedKey {
    inner: SecretBox<[u8; KEY_SIZE]>,
}

impl DerivedKey {
    pub fn expose_secret(&self) -> &[u8; KEY_SIZE] {
        self.inner.expose_secret()
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// # Key Derivation Function
///
/// Holds the password material for a single derivation.
pub struct Derive {
    key: SecretBytes,
}

impl Derive {
    /// # Errors
    /// Returns [`Error::EmptyPassword`] if the input is empty.
    pub fn new(key: &[u8]) -> Result<Self> {
        if key.is_empty() {
            return Err(Error::EmptyPassword);
        }
        Ok(Self { key: SecretBytes::new(key) })
    }

    fn from_secret(key: SecretBytes) -> Result<Self> {
        if key.expose_secret().is_empty() {
            return Err(Error::EmptyPassword);
        }
        Ok(Self { key })
    }

    /// Runs PBKDF2-HMAC-SHA256 over the password and salt.
    pub fn derive_key(&self, salt: &[u8; SALT_LEN]) -> DerivedKey {
        let mut key = Box::new([0u8; KEY_SIZE]);
        pbkdf2_hmac::<Sha256>(self.key.expose_secret(), salt, PBKDF2_ITERATIONS, key.as_mut_slice());
        DerivedKey { inner: SecretBox::new(key) }
    }

    /// Generates a cryptographically secure random salt.
    ///
    /// # Errors
    /// Returns an error if the operating system's random number generator fails.
    pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
        let mut bytes = [0u8; SALT_LEN];
        OsRng.try_fill_bytes(&mut bytes)?;
        Ok(bytes)
    }
}

/// Derives a key on the blocking pool.
///
/// # Errors
/// - [`Error::EmptyPassword`] for an empty password
/// - [`Error::Derivation`] if the blocking task could not complete
pub async fn derive_key(password: &Secret, salt: &[u8; SALT_LEN]) -> Result<DerivedKey> {
    let derive = Derive::from_secret(password.to_bytes())?;
    let salt = *salt;

    tokio::task::spawn_blocking(move || derive.derive_key(&salt)).await.map_err(|e| Error::Derivation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_new_empty() {
        assert!(matches!(Derive::new(&[]), Err(Error::EmptyPassword)));
    }

    #[test]
    fn test_derive_deterministic() {
        let derive = Derive::new(b"password").unwrap();
        let salt = [3u8; SALT_LEN];
        assert_eq!(derive.derive_key(&salt).expose_secret(), derive.derive_key(&salt).expose_secret());
    }

    #[test]
    fn test_known_answer() {
        let key = Derive::new(b"correct horse").unwrap().derive_key(&[7u8; SALT_LEN]);
        assert_eq!(hex::encode(key.expose_secret()), "415669a13f8a80ba9d4d2bc7d52237dd362c45703fce47a93cf98d05467c4721");
    }

    #[test]
    fn test_salt_changes_key() {
        let derive = Derive::new(b"password").unwrap();
        let a = derive.derive_key(&[0u8; SALT_LEN]);
        let b = derive.derive_key(&[1u8; SALT_LEN]);
        assert_ne!(a.expose_secret(), b.expose_secret());
    }

    #[test]
    fn test_generate_salt_unique() {
        let a = Derive::generate_salt().unwrap();
        let b = Derive::generate_salt().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = Derive::new(b"password").unwrap().derive_key(&[0u8; SALT_LEN]);
        assert_eq!(format!("{key:?}"), "DerivedKey([REDACTED])");
    }

    #[tokio::test]
    async fn test_async_derive_matches_sync() {
        let salt = [5u8; SALT_LEN];
        let sync = Derive::new(b"correct horse").unwrap().derive_key(&salt);
        let key = derive_key(&Secret::new("correct horse"), &salt).await.unwrap();
        assert_eq!(key.expose_secret(), sync.expose_secret());
    }

    #[tokio::test]
    async fn test_async_derive_empty_password() {
        let result = derive_key(&Secret::new(""), &[0u8; SALT_LEN]).await;
        assert!(matches!(result, Err(Error::EmptyPassword)));
    }
}
