use secrecy::{ExposeSecret, SecretBox, SecretString};

pub struct SecretBytes {
    inner: SecretBox<Vec<u8>>,
}

impl SecretBytes {
    pub fn new(data: &[u8]) -> Self {
        Self { inner: SecretBox::new(Box::new(data.to_vec())) }
    }

    pub fn expose_secret(&self) -> &[u8] {
        self.inner.expose_secret()
    }
}

impl std::fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretBytes([... {} bytes ...])", self.inner.expose_secret().len())
    }
}

/// A user password. Zeroized on drop, redacted in `Debug`.
pub struct Secret {
    inner: SecretString,
}

impl Secret {
    pub fn new(password: &str) -> Self {
        Self { inner: SecretString::from(password.to_owned()) }
    }

    pub fn from_string(password: String) -> Self {
        Self { inner: SecretString::from(password) }
    }

    pub fn expose_secret(&self) -> &str {
        self.inner.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.expose_secret().is_empty()
    }

    /// Copies the password bytes into an owned secret that can be moved onto
    /// the blocking pool for key derivation.
    pub(crate) fn to_bytes(&self) -> SecretBytes {
        SecretBytes::new(self.expose_secret().as_bytes())
    }
}

impl From<SecretString> for Secret {
    fn from(secret: SecretString) -> Self {
        Self { inner: secret }
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let secret = Secret::new("hunter2");
        assert!(!format!("{secret:?}").contains("hunter2"));
        assert!(!format!("{:?}", secret.to_bytes()).contains("hunter2"));
    }

    #[test]
    fn test_to_bytes_matches_password() {
        let secret = Secret::new("correct horse");
        assert_eq!(secret.to_bytes().expose_secret(), b"correct horse");
        assert!(!secret.is_empty());
        assert!(Secret::new("").is_empty());
    }
}
