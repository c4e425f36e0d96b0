//! # Container Codec
//!
//! Binary layout of every encrypted artifact:
//!
//! ```text
//! [16 bytes salt] [12 or 16 bytes IV] [ciphertext...]
//! ```
//!
//! There are no length prefixes: the salt length is fixed, the IV length is
//! a property of the algorithm and the ciphertext consumes the remainder.
//!
//! For file containers the ciphertext region is itself framed by
//! [`payload`]: an encrypted JSON [`FileMetadata`] block followed by the
//! sealed chunks, whose boundaries [`ChunkLayout`] computes from that
//! metadata.

use crate::config::SALT_LEN;
use crate::error::{Error, Result};

pub mod layout;
pub mod metadata;
pub mod payload;

pub use layout::ChunkLayout;
pub use metadata::FileMetadata;

/// A borrowed view of a container's three regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Container<'a> {
    pub salt: &'a [u8; SALT_LEN],
    pub iv: &'a [u8],
    pub ciphertext: &'a [u8],
}

impl<'a> Container<'a> {
    #[inline]
    pub fn new(salt: &'a [u8; SALT_LEN], iv: &'a [u8], ciphertext: &'a [u8]) -> Self {
        Self { salt, iv, ciphertext }
    }

    /// `salt || iv || ciphertext`.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.salt.len() + self.iv.len() + self.ciphertext.len());
        bytes.extend_from_slice(self.salt);
        bytes.extend_from_slice(self.iv);
        bytes.extend_from_slice(self.ciphertext);
        bytes
    }

    /// Slices `bytes` at the fixed salt and IV offsets.
    ///
    /// # Errors
    /// [`Error::Corrupted`] if `bytes` is shorter than `16 + iv_len`.
    pub fn decode(bytes: &'a [u8], iv_len: usize) -> Result<Self> {
        let header_len = SALT_LEN + iv_len;
        if bytes.len() < header_len {
            return Err(Error::corrupted(format!("container too short: need at least {header_len} bytes, got {}", bytes.len())));
        }

        let (salt, rest) = bytes.split_at(SALT_LEN);
        let (iv, ciphertext) = rest.split_at(iv_len);
        let salt = salt.try_into().map_err(|_| Error::corrupted("salt length"))?;

        Ok(Self { salt, iv, ciphertext })
    }

    /// Total encoded length.
    #[inline]
    pub fn len(&self) -> usize {
        SALT_LEN + self.iv.len() + self.ciphertext.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
