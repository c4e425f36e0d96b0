//! Text encryption as printable strings.
//!
//! The string form is the standard base64 encoding of an AES-GCM envelope
//! over the UTF-8 bytes of the text.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::cipher::Algorithm;
use crate::envelope::{decrypt_bytes, encrypt_data};
use crate::error::{Error, Result};
use crate::secret::Secret;

const TEXT_ALGORITHM: Algorithm = Algorithm::AesGcm;

pub async fn encrypt_text(text: &str, password: &Secret) -> Result<String> {
    let sealed = encrypt_data(text.as_bytes(), password, TEXT_ALGORITHM).await?;
    Ok(STANDARD.encode(sealed))
}

/// # Errors
/// [`Error::Corrupted`] for input that is not base64 or does not decrypt to
/// UTF-8; [`Error::Decryption`] for a wrong password.
pub async fn decrypt_text(encoded: &str, password: &Secret) -> Result<String> {
    let sealed = STANDARD.decode(encoded.trim()).map_err(|e| Error::corrupted(format!("invalid base64: {e}")))?;
    let plaintext = decrypt_bytes(&sealed, password, TEXT_ALGORITHM).await?;
    String::from_utf8(plaintext).map_err(|_| Error::corrupted("decrypted text is not valid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_text_roundtrip() {
        let password = Secret::new("correct horse");
        let encoded = encrypt_text("hello world", &password).await.unwrap();
        assert!(encoded.is_ascii());
        assert_eq!(decrypt_text(&encoded, &password).await.unwrap(), "hello world");
    }

    #[tokio::test]
    async fn test_unicode_and_whitespace() {
        let password = Secret::new("pw");
        let encoded = encrypt_text("héllo wörld ✓", &password).await.unwrap();
        let padded = format!("  {encoded}\n");
        assert_eq!(decrypt_text(&padded, &password).await.unwrap(), "héllo wörld ✓");
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let encoded = encrypt_text("secret", &Secret::new("correct horse")).await.unwrap();
        let result = decrypt_text(&encoded, &Secret::new("wrong password")).await;
        assert!(matches!(result, Err(Error::Decryption)));
    }

    #[tokio::test]
    async fn test_invalid_base64() {
        let result = decrypt_text("not base64!!", &Secret::new("pw")).await;
        assert!(matches!(result, Err(Error::Corrupted(_))));
    }

    #[tokio::test]
    async fn test_empty_text_rejected() {
        assert!(matches!(encrypt_text("", &Secret::new("pw")).await, Err(Error::EmptyInput)));
    }
}
