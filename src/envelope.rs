//! Single-shot encryption of in-memory payloads.
//!
//! An envelope is a bare container: `salt || iv || AEAD(data)`. There is no
//! metadata segment and no chunking, so the algorithm must be known to the
//! caller on both sides.

use tracing::debug;

use crate::cipher::{Algorithm, Cipher, Derive, derive_key, generate_iv};
use crate::container::Container;
use crate::error::{Error, Result};
use crate::secret::Secret;
use crate::validation::validate_password;

/// Seals `data` under a key derived from `password` with a fresh salt and IV.
///
/// # Errors
/// [`Error::EmptyPassword`] or [`Error::EmptyInput`] before any key is
/// derived; cipher errors otherwise.
pub async fn encrypt_data(data: &[u8], password: &Secret, algorithm: Algorithm) -> Result<Vec<u8>> {
    validate_password(password)?;
    if data.is_empty() {
        return Err(Error::EmptyInput);
    }

    let salt = Derive::generate_salt()?;
    let key = derive_key(password, &salt).await?;
    let iv = generate_iv(algorithm)?;
    let ciphertext = Cipher::new(&key, algorithm)?.encrypt(&iv, data)?;

    debug!(%algorithm, bytes = data.len(), "sealed envelope");
    Ok(Container::new(&salt, &iv, &ciphertext).encode())
}

/// Opens an envelope produced by [`encrypt_data`] with the same algorithm.
///
/// # Errors
/// [`Error::Corrupted`] if `bytes` is shorter than the salt and IV,
/// [`Error::Decryption`] for a wrong password or modified data.
pub async fn decrypt_bytes(bytes: &[u8], password: &Secret, algorithm: Algorithm) -> Result<Vec<u8>> {
    validate_password(password)?;
    let container = Container::decode(bytes, algorithm.iv_len())?;
    if container.ciphertext.is_empty() {
        return Err(Error::corrupted("envelope has no ciphertext"));
    }

    let key = derive_key(password, container.salt).await?;
    Cipher::new(&key, algorithm)?.decrypt(container.iv, container.ciphertext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SALT_LEN, TAG_SIZE};

    #[tokio::test]
    async fn test_hello_world_envelope() {
        let password = Secret::new("correct horse");
        let sealed = encrypt_data(b"hello world", &password, Algorithm::AesGcm).await.unwrap();
        assert_eq!(sealed.len(), SALT_LEN + 12 + 11 + TAG_SIZE);

        let opened = decrypt_bytes(&sealed, &password, Algorithm::AesGcm).await.unwrap();
        assert_eq!(opened, b"hello world");

        let wrong = decrypt_bytes(&sealed, &Secret::new("wrong password"), Algorithm::AesGcm).await;
        assert!(matches!(wrong, Err(Error::Decryption)));
    }

    #[tokio::test]
    async fn test_every_algorithm() {
        let password = Secret::new("pw");
        for algorithm in [Algorithm::AesGcm, Algorithm::AesGcmIv16, Algorithm::ChaCha20Poly1305] {
            let sealed = encrypt_data(b"payload", &password, algorithm).await.unwrap();
            assert_eq!(sealed.len(), SALT_LEN + algorithm.iv_len() + 7 + TAG_SIZE);
            assert_eq!(decrypt_bytes(&sealed, &password, algorithm).await.unwrap(), b"payload");
        }
    }

    #[tokio::test]
    async fn test_wrong_algorithm_fails() {
        let password = Secret::new("pw");
        let sealed = encrypt_data(b"payload", &password, Algorithm::AesGcm).await.unwrap();
        assert!(decrypt_bytes(&sealed, &password, Algorithm::ChaCha20Poly1305).await.is_err());
    }

    #[tokio::test]
    async fn test_fresh_salt_and_iv() {
        let password = Secret::new("pw");
        let a = encrypt_data(b"same", &password, Algorithm::AesGcm).await.unwrap();
        let b = encrypt_data(b"same", &password, Algorithm::AesGcm).await.unwrap();
        assert_ne!(a[..SALT_LEN], b[..SALT_LEN]);
        assert_ne!(a[SALT_LEN..SALT_LEN + 12], b[SALT_LEN..SALT_LEN + 12]);
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_rejects_bad_input() {
        let password = Secret::new("pw");
        assert!(matches!(encrypt_data(b"", &password, Algorithm::AesGcm).await, Err(Error::EmptyInput)));
        assert!(matches!(encrypt_data(b"x", &Secret::new(""), Algorithm::AesGcm).await, Err(Error::EmptyPassword)));
        assert!(matches!(decrypt_bytes(&[0u8; 27], &password, Algorithm::AesGcm).await, Err(Error::Corrupted(_))));
        assert!(matches!(decrypt_bytes(&[0u8; 28], &password, Algorithm::AesGcm).await, Err(Error::Corrupted(_))));
    }

    #[tokio::test]
    async fn test_bit_flip_fails() {
        let password = Secret::new("pw");
        let mut sealed = encrypt_data(b"hello world", &password, Algorithm::AesGcm).await.unwrap();
        sealed[SALT_LEN + 12] ^= 0x01;
        assert!(matches!(decrypt_bytes(&sealed, &password, Algorithm::AesGcm).await, Err(Error::Decryption)));
    }
}
