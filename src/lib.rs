//! cryptkit - password-based file and text encryption.
//!
//! - PBKDF2-HMAC-SHA256 key derivation (100,000 iterations)
//! - AES-256-GCM and ChaCha20-Poly1305 authenticated encryption
//! - Chunked, strictly sequential file encryption with progress reporting
//! - Self-describing `salt || iv || ciphertext` containers with encrypted
//!   metadata and a SHA-256 integrity record
//! - Password strength scoring and password, key and hash generators

pub mod cipher;
pub mod config;
pub mod container;
pub mod envelope;
pub mod error;
pub mod password;
pub mod secret;
pub mod source;
pub mod stream;
pub mod text;
pub mod types;
pub mod validation;

pub use cipher::{Algorithm, HashAlgorithm, Integrity, KeyLength, derive_key, digest_hex, generate_key, verify};
pub use container::{Container, FileMetadata};
pub use envelope::{decrypt_bytes, encrypt_data};
pub use error::{Error, Result};
pub use password::{PasswordOptions, PasswordStrengthReport, StrengthLevel, evaluate_password_strength, generate_password};
pub use secret::Secret;
pub use source::Source;
pub use stream::{Decrypted, Observer, Silent, decrypt_data, encrypt_large_file};
pub use text::{decrypt_text, encrypt_text};
pub use types::{Processing, Stage};
