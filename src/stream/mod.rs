//! # Streaming Cipher Driver
//!
//! Encrypts and decrypts file containers chunk by chunk.
//!
//! Chunks are processed strictly in sequence on the calling task: each chunk
//! is read, sealed and appended before the next one is touched, and the task
//! yields between chunks. Output bytes are therefore ordered exactly as the
//! source, and processing memory stays bounded by one chunk. The sealed
//! output itself is accumulated in memory and returned as one buffer.
//!
//! Each operation derives its own salt, IV and key; nothing is shared or
//! cached between calls.

mod decryptor;
mod encryptor;
pub mod observer;

pub use decryptor::{Decrypted, decrypt_data};
pub use encryptor::encrypt_large_file;
pub use observer::{Observer, Silent};
