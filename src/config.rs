//! Global Configuration Constants
//!
//! This module contains the fixed parameters used throughout cryptkit: key
//! derivation cost, container layout sizes, chunking defaults and the input
//! limits enforced before any cryptographic work starts.
//!
//! ## Design Philosophy
//!
//! - **Fixed cost factors**: the PBKDF2 iteration count is a constant so no
//!   caller can weaken the derivation by accident
//! - **Self-describing layout**: every size the container parser relies on is
//!   either defined here or carried by the algorithm identifier
//! - **Bounded inputs**: oversized sources are rejected up front

/// Application name used in user interfaces.
pub const APP_NAME: &str = "cryptkit";

/// Suffix appended to encrypted files by the terminal front-end.
pub const FILE_EXTENSION: &str = ".encrypted";

// === PBKDF2 Key Derivation Parameters ===

/// PBKDF2-HMAC-SHA256 iteration count.
///
/// The cost factor against brute-force guessing. Not user-tunable.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Length of the random salt stored at the head of every container.
///
/// 16 bytes of fresh randomness per encryption call, so identical passwords
/// never derive identical keys.
pub const SALT_LEN: usize = 16;

/// Size of derived keys in bytes (256-bit).
pub const KEY_SIZE: usize = 32;

// === AEAD Parameters ===

/// Standard 96-bit nonce for AES-GCM and ChaCha20-Poly1305.
pub const STANDARD_IV_SIZE: usize = 12;

/// Extended 128-bit IV accepted by the wide AES-GCM variant.
pub const WIDE_IV_SIZE: usize = 16;

/// Authentication tag appended by every supported AEAD.
///
/// Chunk boundaries inside a file container are computed from this value:
/// each sealed chunk is exactly its plaintext length plus the tag.
pub const TAG_SIZE: usize = 16;

/// Number of trailing IV bytes mixed with the segment index when deriving
/// per-segment nonces.
pub const NONCE_COUNTER_SIZE: usize = 8;

// === Container Layout ===

/// Width of the big-endian length prefix in front of the encrypted metadata.
pub const METADATA_LEN_SIZE: usize = 4;

/// Upper bound on the encrypted metadata segment.
///
/// Metadata is a small JSON object; anything larger is treated as corruption
/// rather than trusted as a length.
pub const MAX_METADATA_LEN: usize = 64 * 1024;

/// MIME type recorded when the source does not provide one.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

// === Chunking and Input Limits ===

/// Default chunk size for streaming encryption (1 MiB).
///
/// Peak processing memory is roughly this size per chunk in flight.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Largest source accepted for file encryption (100 MiB).
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Extensions the front-end refuses to encrypt.
pub const BLOCKED_EXTENSIONS: &[&str] = &[".exe", ".bat", ".cmd", ".sh", ".js"];

// === Passwords ===

/// Strength score below which the front-end refuses to encrypt.
pub const MIN_ENCRYPTION_SCORE: u8 = 40;

/// Length below which a password is reported as too short.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Length at which a password earns the length bonus.
pub const PASSWORD_GOOD_LENGTH: usize = 12;

/// Default length of generated passwords.
pub const DEFAULT_PASSWORD_LENGTH: usize = 16;
